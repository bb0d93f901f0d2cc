mod general_tests;
