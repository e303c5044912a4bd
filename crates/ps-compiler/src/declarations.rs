use ps_core::{
    Expr, Feature, FieldInit, Identifier, InferredVariableDecl, Literal, TranspileError, TypeRef,
    VariableDecl,
};

use crate::generator::CodeGenerator;

impl CodeGenerator<'_> {
    pub(crate) fn variable(&mut self, declaration: &VariableDecl) -> Result<(), TranspileError> {
        let suffix = self.declaration_suffix(declaration.constant, declaration.conditional)?;
        self.declaration(
            &declaration.ty.to_string(),
            &declaration.name,
            Some(&declaration.ty),
            declaration.init.as_ref(),
            &suffix,
        )
    }

    pub(crate) fn inferred_variable(
        &mut self,
        declaration: &InferredVariableDecl,
    ) -> Result<(), TranspileError> {
        self.require(Feature::InferredVariable)?;
        let suffix = self.declaration_suffix(declaration.constant, declaration.conditional)?;
        self.declaration(
            "Var",
            &declaration.name,
            None,
            declaration.init.as_ref(),
            &suffix,
        )
    }

    fn declaration_suffix(
        &self,
        constant: bool,
        conditional: bool,
    ) -> Result<String, TranspileError> {
        let mut parts = Vec::new();
        if constant {
            self.require(Feature::ConstModifier)?;
            parts.push("Const");
        }
        if conditional {
            parts.push("Conditional");
        }
        Ok(parts.join(" "))
    }

    /// `<head> <name>[ = <init>] <suffix>`, with array and struct literals
    /// expanded into the allocation followed by one assignment per element.
    fn declaration(
        &mut self,
        head: &str,
        name: &Identifier,
        declared: Option<&TypeRef>,
        init: Option<&Expr>,
        suffix: &str,
    ) -> Result<(), TranspileError> {
        let name = name.normalized();
        let Some(init) = init else {
            self.emit(format!("{} {} {}", head, name, suffix));
            return Ok(());
        };

        match init {
            Expr::ArrayInit { elements } => {
                let element_type = array_element_type(&name, declared, elements)?;
                self.emit(format!(
                    "{} {} = new {}[{}] {}",
                    head,
                    name,
                    element_type,
                    elements.len(),
                    suffix
                ));
                for (index, element) in elements.iter().enumerate() {
                    self.emit(format!("{}[{}] = {}", name, index, element));
                }
            }
            Expr::StructInit { fields } => {
                self.require(Feature::StructInitializer)?;
                let struct_type = match declared {
                    Some(ty) if !ty.array => ty,
                    Some(_) => {
                        return Err(TranspileError::MalformedInitializer(format!(
                            "struct literal assigned to array variable \"{}\"",
                            name
                        )))
                    }
                    None => {
                        return Err(TranspileError::MalformedInitializer(format!(
                            "struct literal for \"{}\" needs a declared struct type",
                            name
                        )))
                    }
                };
                self.emit(format!("{} {} = new {} {}", head, name, struct_type, suffix));
                self.field_assignments(&name, fields)?;
            }
            other => {
                let value = self.expr(other)?;
                self.emit(format!("{} {} = {} {}", head, name, value, suffix));
            }
        }
        Ok(())
    }

    fn field_assignments(&mut self, name: &str, fields: &[FieldInit]) -> Result<(), TranspileError> {
        for field in fields {
            let value = self.expr(&field.value)?;
            self.emit(format!("{}.{} = {}", name, field.name.normalized(), value));
        }
        Ok(())
    }
}

fn array_element_type(
    name: &str,
    declared: Option<&TypeRef>,
    elements: &[Literal],
) -> Result<TypeRef, TranspileError> {
    match declared {
        Some(ty) if ty.array => Ok(ty.element()),
        Some(_) => Err(TranspileError::MalformedInitializer(format!(
            "array literal assigned to non-array variable \"{}\"",
            name
        ))),
        None => elements
            .first()
            .and_then(Literal::type_name)
            .map(TypeRef::named)
            .ok_or_else(|| {
                TranspileError::MalformedInitializer(format!(
                    "cannot infer element type of array literal for \"{}\"",
                    name
                ))
            }),
    }
}
