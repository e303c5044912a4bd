use ps_core::{Expr, Feature, TranspileError};

use crate::generator::CodeGenerator;

impl CodeGenerator<'_> {
    pub(crate) fn expr(&self, expr: &Expr) -> Result<String, TranspileError> {
        let text = match expr {
            Expr::Literal { value } => value.to_string(),
            Expr::Name { name } => name.normalized(),
            Expr::Binary { lhs, op, rhs } => {
                format!("{} {} {}", self.expr(lhs)?, op, self.expr(rhs)?)
            }
            Expr::Not { operand } => format!("!{}", self.expr(operand)?),
            Expr::Negate { operand } => format!("-{}", self.expr(operand)?),
            Expr::Paren { inner } => format!("({})", self.expr(inner)?),
            Expr::Assign { target, op, value } => {
                format!("{} {} {}", self.expr(target)?, op, self.expr(value)?)
            }
            Expr::Call { callee, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.expr(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                format!("{}({})", callee.normalized(), args.join(", "))
            }
            Expr::Index { array, index } => {
                format!("{}[{}]", self.expr(array)?, self.expr(index)?)
            }
            Expr::NewArray { element_type, size } => {
                format!("new {}[{}]", element_type, self.expr(size)?)
            }
            Expr::NewStruct { struct_type } => {
                self.require(Feature::NewStruct)?;
                format!("new {}", struct_type)
            }
            Expr::ArrayInit { .. } => {
                return Err(TranspileError::MalformedInitializer(
                    "array literal is only allowed as a variable initializer".to_string(),
                ))
            }
            Expr::StructInit { .. } => {
                self.require(Feature::StructInitializer)?;
                return Err(TranspileError::MalformedInitializer(
                    "struct literal is only allowed as a variable initializer".to_string(),
                ));
            }
            Expr::Cast {
                operand,
                target_type,
            } => format!("{} As {}", self.expr(operand)?, target_type),
            Expr::Is {
                operand,
                target_type,
            } => format!("{} Is {}", self.expr(operand)?, target_type),
            Expr::Increment { target } => format!("{} += 1", target.normalized()),
            Expr::Decrement { target } => format!("{} -= 1", target.normalized()),
        };
        Ok(text)
    }
}

#[cfg(test)]
mod expressions_tests {
    use super::*;
    use crate::DirectiveTable;
    use ps_core::{Game, Literal, QualifiedName, TypeRef};

    fn render(game: Game, expr: &Expr) -> Result<String, TranspileError> {
        let directives = DirectiveTable::new();
        CodeGenerator::for_game(game, &directives).expr(expr)
    }

    #[test]
    fn operators_render_verbatim() {
        let expr = Expr::binary(
            Expr::binary(Expr::name("a"), "+", Expr::int("1")),
            ">=",
            Expr::Paren {
                inner: Box::new(Expr::binary(Expr::name("b"), "*", Expr::int("2"))),
            },
        );
        assert_eq!(render(Game::SkyrimSE, &expr).expect("render"), "a + 1 >= (b * 2)");

        let not = Expr::Not {
            operand: Box::new(Expr::call("IsDead", vec![])),
        };
        assert_eq!(render(Game::SkyrimSE, &not).expect("render"), "!IsDead()");
    }

    #[test]
    fn calls_casts_and_type_tests() {
        let call = Expr::call(
            "MyMod::Utils.Notify",
            vec![
                Expr::Literal {
                    value: Literal::String("hi".to_string()),
                },
                Expr::name("self"),
            ],
        );
        assert_eq!(
            render(Game::SkyrimSE, &call).expect("render"),
            "MyMod:Utils.Notify(\"hi\", self)"
        );

        let cast = Expr::Cast {
            operand: Box::new(Expr::name("akActor")),
            target_type: TypeRef::named("Actor"),
        };
        assert_eq!(render(Game::SkyrimSE, &cast).expect("render"), "akActor As Actor");

        let is = Expr::Is {
            operand: Box::new(Expr::name("ref")),
            target_type: TypeRef::named("ObjectReference"),
        };
        assert_eq!(render(Game::SkyrimSE, &is).expect("render"), "ref Is ObjectReference");
    }

    #[test]
    fn arrays_and_steps() {
        let index = Expr::Index {
            array: Box::new(Expr::name("items")),
            index: Box::new(Expr::binary(Expr::name("i"), "-", Expr::int("1"))),
        };
        assert_eq!(render(Game::SkyrimSE, &index).expect("render"), "items[i - 1]");

        let new_array = Expr::NewArray {
            element_type: TypeRef::named("Form"),
            size: Box::new(Expr::int("10")),
        };
        assert_eq!(render(Game::SkyrimSE, &new_array).expect("render"), "new Form[10]");

        let increment = Expr::Increment {
            target: QualifiedName::from("self.count"),
        };
        assert_eq!(render(Game::SkyrimSE, &increment).expect("render"), "self.count += 1");
        let decrement = Expr::Decrement {
            target: QualifiedName::from("n"),
        };
        assert_eq!(render(Game::SkyrimSE, &decrement).expect("render"), "n -= 1");
    }

    #[test]
    fn new_struct_is_extended_only() {
        let expr = Expr::NewStruct {
            struct_type: TypeRef::named("NS::Point"),
        };
        assert_eq!(render(Game::Fallout4, &expr).expect("render"), "new NS:Point");
        assert_eq!(
            render(Game::SkyrimSE, &expr).expect_err("gated"),
            TranspileError::unsupported("new struct", Game::Fallout4)
        );
    }

    #[test]
    fn literals_outside_declarations_are_malformed() {
        let array = Expr::ArrayInit {
            elements: vec![Literal::Int("1".to_string())],
        };
        let error = render(Game::Fallout4, &array).expect_err("wrong context");
        assert_eq!(error.code(), "MALFORMED_INITIALIZER");

        let structure = Expr::StructInit { fields: vec![] };
        let error = render(Game::Fallout4, &structure).expect_err("wrong context");
        assert_eq!(error.code(), "MALFORMED_INITIALIZER");
    }
}
