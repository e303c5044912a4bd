use ps_core::{Block, IfStmt, RangeStmt, Stmt, SwitchStmt, TranspileError, WhileStmt};

use crate::generator::CodeGenerator;

impl CodeGenerator<'_> {
    /// One indentation level per block; nesting compounds through recursion.
    pub(crate) fn block(&mut self, block: &Block) -> Result<(), TranspileError> {
        self.enter();
        self.statements(&block.statements)?;
        self.exit();
        Ok(())
    }

    fn statements(&mut self, statements: &[Stmt]) -> Result<(), TranspileError> {
        for statement in statements {
            self.stmt(statement)?;
        }
        Ok(())
    }

    fn stmt(&mut self, statement: &Stmt) -> Result<(), TranspileError> {
        match statement {
            Stmt::Expr { expr } => {
                let line = self.expr(expr)?;
                self.emit(line);
            }
            Stmt::Return { value: Some(value) } => {
                let line = format!("Return {}", self.expr(value)?);
                self.emit(line);
            }
            Stmt::Return { value: None } => self.emit("Return"),
            Stmt::Variable(declaration) => self.variable(declaration)?,
            Stmt::InferredVariable(declaration) => self.inferred_variable(declaration)?,
            Stmt::If(stmt) => self.if_stmt(stmt)?,
            Stmt::While(stmt) => self.while_stmt(stmt)?,
            Stmt::Range(stmt) => self.range_stmt(stmt)?,
            Stmt::Switch(stmt) => self.switch_stmt(stmt)?,
            Stmt::Conditional(block) => {
                if self.directive_enabled(&block.name) {
                    self.statements(&block.body)?;
                }
            }
        }
        Ok(())
    }

    fn if_stmt(&mut self, stmt: &IfStmt) -> Result<(), TranspileError> {
        let condition = self.expr(&stmt.condition)?;
        self.emit(format!("If {}", condition));
        self.block(&stmt.then_block)?;

        for branch in &stmt.else_ifs {
            let condition = self.expr(&branch.condition)?;
            self.emit(format!("ElseIf {}", condition));
            self.block(&branch.block)?;
        }

        if let Some(else_block) = &stmt.else_block {
            self.emit("Else");
            self.block(else_block)?;
        }

        self.emit("EndIf");
        Ok(())
    }

    fn while_stmt(&mut self, stmt: &WhileStmt) -> Result<(), TranspileError> {
        let condition = self.expr(&stmt.condition)?;
        self.emit(format!("While {}", condition));

        // Nested blocks inside a loop body render flat, one level below `While`.
        let body = self.detached(|generator| generator.statements(&stmt.body.statements))?;

        self.enter();
        for line in body {
            self.emit(line.trim());
        }
        self.exit();
        self.emit("EndWhile");
        Ok(())
    }

    /// `for element in array` becomes an index-driven while loop. The index
    /// name is `<array>Index` and is not checked against existing names.
    fn range_stmt(&mut self, stmt: &RangeStmt) -> Result<(), TranspileError> {
        let array = stmt.array.normalized();
        let element = stmt.element.normalized();
        let index = format!("{}Index", array);

        self.emit(format!("Int {} = 0", index));
        self.emit(format!("While {} < {}.Length", index, array));
        self.enter();
        self.emit(format!("Int {} = {}[{}]", element, array, index));
        self.statements(&stmt.body.statements)?;
        self.emit(format!("{} += 1", index));
        self.exit();
        self.emit("EndWhile");
        Ok(())
    }

    /// Lowered to an If/ElseIf chain. The subject text is repeated in every
    /// condition, so it is evaluated once per comparison.
    fn switch_stmt(&mut self, stmt: &SwitchStmt) -> Result<(), TranspileError> {
        let subject = self.expr(&stmt.subject)?;

        if stmt.cases.is_empty() {
            if let Some(default) = &stmt.default {
                self.statements(&default.statements)?;
            }
            return Ok(());
        }

        for (position, case) in stmt.cases.iter().enumerate() {
            let keyword = if position == 0 { "If" } else { "ElseIf" };
            let value = self.expr(&case.value)?;
            self.emit(format!("{} {} == {}", keyword, subject, value));
            self.block(&case.body)?;
        }

        if let Some(default) = &stmt.default {
            self.emit("Else");
            self.block(default)?;
        }

        self.emit("EndIf");
        Ok(())
    }
}
