mod types;
use std::collections::HashMap;
use std::fmt;

pub use types::{ByteCode, JmpWhen};

use crate::{Environment, EvalError, EvalResult, RuleValue};

struct InterpStack<'a> {
    stack: Vec<RuleValue>,

    env: &'a Environment,
}

impl<'a> InterpStack<'a> {
    fn new(env: &'a Environment) -> InterpStack<'a> {
        InterpStack {
            stack: Vec::new(),
            env,
        }
    }

    fn push(&mut self, val: RuleValue) {
        self.stack.push(val);
    }

    /// Pops a value, resolving identifier references against the
    /// environment's data bindings. An unresolvable identifier is a
    /// binding error.
    fn pop(&mut self) -> EvalResult<RuleValue> {
        match self.stack.pop() {
            Some(RuleValue::Ident(name)) => match self.env.get_param(&name) {
                Some(val) => Ok(val.clone()),
                None => Err(EvalError::binding(&name)),
            },
            Some(val) => Ok(val),
            None => Err(EvalError::runtime("No value on stack!")),
        }
    }

    /// Pops a value without resolving identifiers. Used for call targets,
    /// which dispatch through the function whitelist instead of the data
    /// bindings.
    fn pop_noresolve(&mut self) -> EvalResult<RuleValue> {
        match self.stack.pop() {
            Some(val) => Ok(val),
            None => Err(EvalError::runtime("No value on stack!")),
        }
    }
}

impl<'a> fmt::Debug for InterpStack<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.stack)
    }
}

/// Stack machine that runs compiled rule bytecode against an
/// [`Environment`].
///
/// Every opcode either manipulates the value stack or dispatches through
/// the environment; there is no opcode for iteration, attribute traversal
/// or I/O, so the reachable behavior is bounded by the environment's
/// whitelist by construction.
pub struct Interpreter<'a> {
    env: &'a Environment,
}

impl<'a> Interpreter<'a> {
    pub fn new(env: &'a Environment) -> Interpreter<'a> {
        Interpreter { env }
    }

    pub fn run_raw(&self, prog: &[ByteCode]) -> EvalResult<RuleValue> {
        let mut pc: usize = 0;
        let mut stack = InterpStack::new(self.env);

        while pc < prog.len() {
            let oldpc = pc;
            pc += 1;
            match &prog[oldpc] {
                ByteCode::Push(val) => stack.push(val.clone()),
                ByteCode::Or => {
                    let v2 = stack.pop()?;
                    let v1 = stack.pop()?;

                    stack.push(v1.or(&v2)?)
                }
                ByteCode::And => {
                    let v2 = stack.pop()?;
                    let v1 = stack.pop()?;

                    stack.push(v1.and(&v2)?)
                }
                ByteCode::Not => {
                    let v1 = stack.pop()?;

                    stack.push((!v1)?);
                }
                ByteCode::Neg => {
                    let v1 = stack.pop()?;

                    stack.push((-v1)?);
                }
                ByteCode::Add => {
                    let v2 = stack.pop()?;
                    let v1 = stack.pop()?;

                    stack.push((v1 + v2)?);
                }
                ByteCode::Sub => {
                    let v2 = stack.pop()?;
                    let v1 = stack.pop()?;

                    stack.push((v1 - v2)?);
                }
                ByteCode::Mul => {
                    let v2 = stack.pop()?;
                    let v1 = stack.pop()?;

                    stack.push((v1 * v2)?);
                }
                ByteCode::Div => {
                    let v2 = stack.pop()?;
                    let v1 = stack.pop()?;

                    stack.push((v1 / v2)?);
                }
                ByteCode::Mod => {
                    let v2 = stack.pop()?;
                    let v1 = stack.pop()?;

                    stack.push((v1 % v2)?);
                }
                ByteCode::Jmp(dist) => pc += *dist as usize,
                ByteCode::JmpCond {
                    when,
                    dist,
                    leave_val,
                } => {
                    let v1 = stack.pop()?;
                    let truthy = v1.is_truthy();
                    match when {
                        JmpWhen::True => {
                            if truthy {
                                pc += *dist as usize;
                            }
                        }
                        JmpWhen::False => {
                            if !truthy {
                                pc += *dist as usize;
                            }
                        }
                    };
                    if *leave_val {
                        stack.push(RuleValue::from_bool(truthy));
                    }
                }
                ByteCode::Lt => {
                    let v2 = stack.pop()?;
                    let v1 = stack.pop()?;

                    stack.push(v1.lt(&v2)?);
                }
                ByteCode::Le => {
                    let v2 = stack.pop()?;
                    let v1 = stack.pop()?;

                    stack.push(v1.le(&v2)?);
                }
                ByteCode::Eq => {
                    let v2 = stack.pop()?;
                    let v1 = stack.pop()?;

                    stack.push(v1.eq(&v2)?);
                }
                ByteCode::Ne => {
                    let v2 = stack.pop()?;
                    let v1 = stack.pop()?;

                    stack.push(v1.neq(&v2)?);
                }
                ByteCode::Ge => {
                    let v2 = stack.pop()?;
                    let v1 = stack.pop()?;

                    stack.push(v1.ge(&v2)?);
                }
                ByteCode::Gt => {
                    let v2 = stack.pop()?;
                    let v1 = stack.pop()?;

                    stack.push(v1.gt(&v2)?);
                }
                ByteCode::In => {
                    let rhs = stack.pop()?;
                    let lhs = stack.pop()?;

                    stack.push(lhs.in_(&rhs)?);
                }
                ByteCode::MkList(size) => {
                    let mut v = Vec::new();

                    for _ in 0..*size {
                        v.push(stack.pop()?)
                    }

                    v.reverse();
                    stack.push(v.into());
                }
                ByteCode::MkDict(size) => {
                    let mut map = HashMap::new();

                    for _ in 0..*size {
                        let key = if let RuleValue::String(key) = stack.pop()? {
                            key
                        } else {
                            return Err(EvalError::value(
                                "Only strings can be used as map keys",
                            ));
                        };
                        let val = stack.pop()?;

                        // entries pop in reverse source order, so for a
                        // repeated key the later literal entry wins
                        map.entry(key).or_insert(val);
                    }

                    stack.push(map.into());
                }
                ByteCode::Index => {
                    let index = stack.pop()?;
                    let obj = stack.pop()?;

                    stack.push(self.index_value(obj, index)?);
                }
                ByteCode::Call(n_args) => {
                    let mut args = Vec::new();

                    for _ in 0..*n_args {
                        args.push(stack.pop()?)
                    }
                    args.reverse();

                    match stack.pop_noresolve()? {
                        RuleValue::Ident(func_name) => {
                            if let Some(func) = self.env.get_func(&func_name) {
                                stack.push(func(&args)?);
                            } else if self.env.get_param(&func_name).is_some() {
                                return Err(EvalError::not_callable(&func_name));
                            } else {
                                return Err(EvalError::binding(&func_name));
                            }
                        }
                        _ => {
                            return Err(EvalError::runtime(
                                "Only named functions are callable",
                            ))
                        }
                    };
                }
            };
        }

        stack.pop()
    }

    fn index_value(&self, obj: RuleValue, index: RuleValue) -> EvalResult<RuleValue> {
        if let RuleValue::List(list) = obj {
            let raw = if let RuleValue::Int(index) = index {
                index
            } else {
                return Err(EvalError::value("List index must be an int"));
            };

            // Negative indexes count from the end of the list
            let resolved = if raw < 0 { raw + list.len() as i64 } else { raw };

            if resolved < 0 || resolved as usize >= list.len() {
                return Err(EvalError::value("List access out of bounds"));
            }

            Ok(list[resolved as usize].clone())
        } else if let RuleValue::String(s) = obj {
            let raw = if let RuleValue::Int(index) = index {
                index
            } else {
                return Err(EvalError::value("String index must be an int"));
            };

            let chars: Vec<char> = s.chars().collect();
            let resolved = if raw < 0 {
                raw + chars.len() as i64
            } else {
                raw
            };

            if resolved < 0 || resolved as usize >= chars.len() {
                return Err(EvalError::value("String access out of bounds"));
            }

            Ok(RuleValue::from_string(chars[resolved as usize].to_string()))
        } else if let RuleValue::Map(map) = obj {
            if let RuleValue::String(index) = index {
                match map.get(&index) {
                    Some(val) => Ok(val.clone()),
                    None => Err(EvalError::value(&format!(
                        "Map does not contain key \"{}\"",
                        index
                    ))),
                }
            } else {
                Err(EvalError::value("Map index must be a string"))
            }
        } else {
            Err(EvalError::value(&format!(
                "Index operator invalid between {} and {}",
                obj.as_type(),
                index.as_type()
            )))
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{Environment, RuleValue};

    use super::{ByteCode, Interpreter};
    use test_case::test_case;

    #[test_case(ByteCode::Add, 7.into())]
    #[test_case(ByteCode::Sub, 1.into())]
    #[test_case(ByteCode::Mul, 12.into())]
    #[test_case(ByteCode::Div, 1.into())]
    #[test_case(ByteCode::Mod, 1.into())]
    #[test_case(ByteCode::Lt, false.into())]
    #[test_case(ByteCode::Le, false.into())]
    #[test_case(ByteCode::Eq, false.into())]
    #[test_case(ByteCode::Ne, true.into())]
    #[test_case(ByteCode::Ge, true.into())]
    #[test_case(ByteCode::Gt, true.into())]
    fn test_interp_ops(op: ByteCode, expected: RuleValue) {
        let mut prog = vec![ByteCode::Push(4.into()), ByteCode::Push(3.into())];
        prog.push(op);
        let env = Environment::new();
        let interp = Interpreter::new(&env);

        assert!(interp.run_raw(&prog).unwrap() == expected);
    }

    #[test]
    fn test_unbound_ident() {
        let env = Environment::new();
        let interp = Interpreter::new(&env);

        let prog = vec![
            ByteCode::Push(RuleValue::from_ident("nope")),
            ByteCode::Push(1.into()),
            ByteCode::Add,
        ];

        assert!(interp.run_raw(&prog).is_err());
    }

    #[test]
    fn test_negative_index() {
        let env = Environment::new();
        let interp = Interpreter::new(&env);

        let prog = vec![
            ByteCode::Push(vec![1.into(), 2.into(), 3.into()].into()),
            ByteCode::Push((-1i64).into()),
            ByteCode::Index,
        ];

        assert_eq!(interp.run_raw(&prog).unwrap(), 3.into());
    }
}
