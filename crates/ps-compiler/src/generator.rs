use ps_core::game::require;
use ps_core::{
    AutoProperty, Block, EventDecl, Feature, FullProperty, FunctionDecl, FunctionModifier, Game,
    GroupDecl, GroupFlag, Member, Param, PropertyModifier, ScriptDecl, ScriptFlag, StateDecl,
    StructDecl, TranspileError, TypeRef,
};

use crate::directives::{strip_quotes, DirectiveTable};

const INDENT: &str = "    ";

/// Syntax-directed emitter. One instance per transpile call; it owns the
/// output buffer and the nesting depth, and borrows the resolved directives.
#[derive(Debug)]
pub struct CodeGenerator<'a> {
    game: Game,
    directives: &'a DirectiveTable,
    indent: usize,
    lines: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
enum Accessor {
    Get,
    Set,
}

impl<'a> CodeGenerator<'a> {
    /// Fails with `InvalidConfiguration` for an unknown game name.
    pub fn new(game: &str, directives: &'a DirectiveTable) -> Result<Self, TranspileError> {
        Ok(Self::for_game(game.parse()?, directives))
    }

    pub fn for_game(game: Game, directives: &'a DirectiveTable) -> Self {
        Self {
            game,
            directives,
            indent: 0,
            lines: Vec::new(),
        }
    }

    pub fn game(&self) -> Game {
        self.game
    }

    pub fn generate(mut self, script: &ScriptDecl) -> Result<String, TranspileError> {
        self.script(script)?;
        let mut text = self.lines.join("\n");
        text.push('\n');
        Ok(text)
    }

    pub(crate) fn emit(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            self.lines.push(String::new());
            return;
        }
        self.lines.push(format!("{}{}", INDENT.repeat(self.indent), text));
    }

    /// Runs `render` against an empty buffer at depth zero and returns what
    /// it emitted. The outer buffer and depth are restored either way.
    pub(crate) fn detached<F>(&mut self, render: F) -> Result<Vec<String>, TranspileError>
    where
        F: FnOnce(&mut Self) -> Result<(), TranspileError>,
    {
        let saved_lines = std::mem::take(&mut self.lines);
        let saved_indent = std::mem::replace(&mut self.indent, 0);
        let rendered = render(self);
        let lines = std::mem::replace(&mut self.lines, saved_lines);
        self.indent = saved_indent;
        rendered.map(|()| lines)
    }

    pub(crate) fn enter(&mut self) {
        self.indent += 1;
    }

    pub(crate) fn exit(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub(crate) fn require(&self, feature: Feature) -> Result<(), TranspileError> {
        require(feature, self.game)
    }

    pub(crate) fn directive_enabled(&self, name: &str) -> bool {
        let enabled = self.directives.is_enabled(name);
        if !enabled {
            log::debug!("skipping conditional block \"{}\"", name);
        }
        enabled
    }

    fn script(&mut self, script: &ScriptDecl) -> Result<(), TranspileError> {
        let mut header = format!(
            "ScriptName {} extends {}",
            script.name.normalized(),
            script.parent.normalized()
        );
        for flag in &script.flags {
            header.push(' ');
            header.push_str(self.script_flag(*flag)?);
        }
        self.emit(header);
        self.emit("");
        self.members(&script.members)
    }

    fn script_flag(&self, flag: ScriptFlag) -> Result<&'static str, TranspileError> {
        let (feature, keyword) = match flag {
            ScriptFlag::Hidden => return Ok("Hidden"),
            ScriptFlag::Conditional => return Ok("Conditional"),
            ScriptFlag::Beta => (Feature::BetaOnlyScript, "BetaOnly"),
            ScriptFlag::Debug => (Feature::DebugOnlyScript, "DebugOnly"),
            ScriptFlag::Const => (Feature::ConstScript, "Const"),
            ScriptFlag::Native => (Feature::NativeScript, "Native"),
        };
        self.require(feature)?;
        Ok(keyword)
    }

    fn members(&mut self, members: &[Member]) -> Result<(), TranspileError> {
        for member in members {
            self.member(member)?;
        }
        Ok(())
    }

    fn member(&mut self, member: &Member) -> Result<(), TranspileError> {
        match member {
            Member::Import(import) => {
                let path = strip_quotes(&import.path).replace("::", ":");
                self.emit(format!("Import {}", path));
            }
            Member::Variable(declaration) => self.variable(declaration)?,
            Member::InferredVariable(declaration) => self.inferred_variable(declaration)?,
            Member::AutoProperty(property) => self.auto_property(property)?,
            Member::FullProperty(property) => self.full_property(property)?,
            Member::Function(function) => self.function(function)?,
            Member::Event(event) => self.event(event)?,
            Member::State(state) => self.state(state)?,
            Member::Struct(declaration) => self.struct_decl(declaration)?,
            Member::Group(group) => self.group(group)?,
            Member::Conditional(block) => {
                if self.directive_enabled(&block.name) {
                    self.members(&block.body)?;
                }
            }
        }
        Ok(())
    }

    fn params(&self, params: &[Param]) -> Result<String, TranspileError> {
        let mut rendered = Vec::with_capacity(params.len());
        for param in params {
            let mut text = format!("{} {}", param.ty, param.name.normalized());
            if let Some(default) = &param.default {
                text.push_str(" = ");
                text.push_str(&self.expr(default)?);
            }
            rendered.push(text);
        }
        Ok(rendered.join(", "))
    }

    fn function(&mut self, function: &FunctionDecl) -> Result<(), TranspileError> {
        let mut header = String::new();
        if let Some(return_type) = function.return_type.as_ref().filter(|ty| !ty.is_void()) {
            header.push_str(&format!("{} ", return_type));
        }
        header.push_str(&format!(
            "Function {}({})",
            function.name.normalized(),
            self.params(&function.params)?
        ));
        for modifier in &function.modifiers {
            header.push_str(match modifier {
                FunctionModifier::Native => " Native",
                FunctionModifier::Global => " Global",
            });
        }

        self.emit(header);
        self.block(&function.body)?;
        self.emit("EndFunction");
        self.emit("");
        Ok(())
    }

    fn event(&mut self, event: &EventDecl) -> Result<(), TranspileError> {
        let header = format!(
            "Event {}({})",
            event.name.normalized(),
            self.params(&event.params)?
        );
        self.emit(header);
        self.block(&event.body)?;
        self.emit("EndEvent");
        self.emit("");
        Ok(())
    }

    fn auto_property(&mut self, property: &AutoProperty) -> Result<(), TranspileError> {
        let mut line = format!("{} Property {}", property.ty, property.name.normalized());
        if let Some(init) = &property.init {
            line.push_str(" = ");
            line.push_str(&self.expr(init)?);
        }
        line.push(' ');
        line.push_str(match property.modifier {
            None => "Auto",
            Some(PropertyModifier::ReadOnly) => "AutoReadOnly",
            Some(PropertyModifier::Conditional) => "Auto Conditional",
            Some(PropertyModifier::Hidden) => "Auto Hidden",
        });
        if property.constant {
            self.require(Feature::ConstModifier)?;
            line.push_str(" Const");
        }
        if property.mandatory {
            self.require(Feature::MandatoryModifier)?;
            line.push_str(" Mandatory");
        }
        self.emit(line);
        Ok(())
    }

    fn full_property(&mut self, property: &FullProperty) -> Result<(), TranspileError> {
        let name = property.name.normalized();
        if property.getter.is_none() && property.setter.is_none() {
            return Err(TranspileError::MalformedProperty {
                name,
                reason: "declares neither Get nor Set".to_string(),
            });
        }
        if property.ty.is_void() {
            return Err(TranspileError::MalformedProperty {
                name,
                reason: "declared type cannot be void".to_string(),
            });
        }

        self.emit(format!("{} Property {}", property.ty, name));
        if let Some(getter) = &property.getter {
            self.accessor(Accessor::Get, &property.ty, getter)?;
        }
        if let Some(setter) = &property.setter {
            self.accessor(Accessor::Set, &property.ty, setter)?;
        }
        self.emit("EndProperty");
        Ok(())
    }

    fn accessor(
        &mut self,
        accessor: Accessor,
        property_type: &TypeRef,
        body: &Block,
    ) -> Result<(), TranspileError> {
        match accessor {
            Accessor::Get => self.emit(format!("{} Function Get()", property_type)),
            Accessor::Set => self.emit(format!("Function Set({} value)", property_type)),
        }
        self.block(body)?;
        self.emit("EndFunction");
        Ok(())
    }

    fn state(&mut self, state: &StateDecl) -> Result<(), TranspileError> {
        let prefix = if state.auto { "Auto " } else { "" };
        self.emit(format!("{}State {}", prefix, state.name.normalized()));
        self.enter();
        self.members(&state.members)?;
        self.exit();
        self.emit("EndState");
        Ok(())
    }

    fn struct_decl(&mut self, declaration: &StructDecl) -> Result<(), TranspileError> {
        self.require(Feature::StructDecl)?;
        self.emit(format!("Struct {}", declaration.name.normalized()));
        self.enter();
        for field in &declaration.members {
            self.variable(field)?;
        }
        self.exit();
        self.emit("EndStruct");
        Ok(())
    }

    fn group(&mut self, group: &GroupDecl) -> Result<(), TranspileError> {
        self.require(Feature::GroupDecl)?;
        let mut header = format!("Group {}", group.name.normalized());
        for flag in &group.flags {
            header.push_str(match flag {
                GroupFlag::Collapsed => " Collapsed",
                GroupFlag::CollapsedOnRef => " CollapsedOnRef",
                GroupFlag::CollapsedOnBase => " CollapsedOnBase",
            });
        }
        self.emit(header);
        self.enter();
        self.members(&group.members)?;
        self.exit();
        self.emit("EndGroup");
        Ok(())
    }
}

#[cfg(test)]
mod generator_tests {
    use super::*;

    #[test]
    fn unknown_game_fails_at_construction() {
        let directives = DirectiveTable::new();
        let error = CodeGenerator::new("Starfield", &directives).expect_err("unknown game");
        assert_eq!(
            error,
            TranspileError::InvalidConfiguration("Starfield".to_string())
        );

        let generator = CodeGenerator::new("FO4", &directives).expect("known game");
        assert_eq!(generator.game(), Game::Fallout4);
    }

    #[test]
    fn exit_clamps_at_zero() {
        let directives = DirectiveTable::new();
        let mut generator = CodeGenerator::for_game(Game::SkyrimSE, &directives);
        generator.exit();
        generator.exit();
        generator.emit("Line");
        generator.enter();
        generator.emit("Nested");
        generator.emit("");
        assert_eq!(generator.lines, vec!["Line", "    Nested", ""]);
    }

    #[test]
    fn detached_restores_outer_buffer_on_error() {
        let directives = DirectiveTable::new();
        let mut generator = CodeGenerator::for_game(Game::SkyrimSE, &directives);
        generator.enter();
        generator.emit("Outer");

        let nested = generator
            .detached(|inner| {
                inner.enter();
                inner.emit("Inner");
                Ok(())
            })
            .expect("detached render");
        assert_eq!(nested, vec!["    Inner"]);

        let error = generator
            .detached(|inner| {
                inner.emit("Dropped");
                Err(TranspileError::InvalidConfiguration("x".to_string()))
            })
            .expect_err("render fails");
        assert_eq!(error, TranspileError::InvalidConfiguration("x".to_string()));

        generator.emit("After");
        assert_eq!(generator.lines, vec!["    Outer", "    After"]);
    }
}
