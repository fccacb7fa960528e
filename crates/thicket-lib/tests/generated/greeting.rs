// @generated by thicket from grammar `Greeting`. Do not edit.

/// Builds the compiled program for grammar `Greeting`.
pub fn greeting_program() -> Result<thicket::ir::Program, thicket::ir::BuildError> {
    let mut b = thicket::ir::ProgramBuilder::new("Greeting");
    let r0 = b.declare_rule("greeting");
    let r1 = b.declare_rule("name");
    let e0 = b.terminal("hello");
    let e1 = b.terminal(" ");
    let e2 = b.repetition(e1, 1);
    let e3 = b.call(r1);
    let e4 = b.sequence(vec![e0, e2, e3]);
    let e5 = b.class(thicket::ir::CharClass::new("a-z", vec![thicket::ir::ClassRange::new('a', 'z')], false));
    let e6 = b.repetition(e5, 1);
    b.define_rule(r0, e4);
    b.define_rule(r1, e6);
    b.finish()
}

#[derive(Clone)]
pub struct GreetingParser(thicket::vm::CompiledParser);

impl GreetingParser {
    pub fn new() -> Result<Self, thicket::ir::BuildError> {
        Ok(Self(thicket::vm::CompiledParser::new(greeting_program()?)))
    }

    pub fn parse_greeting<'i>(&mut self, input: &'i str) -> Result<Option<thicket::vm::SyntaxTree<'i>>, thicket::vm::RuntimeError> {
        self.0.parse(input, thicket::vm::ParseOptions::new().root("greeting"))
    }

    pub fn parse_name<'i>(&mut self, input: &'i str) -> Result<Option<thicket::vm::SyntaxTree<'i>>, thicket::vm::RuntimeError> {
        self.0.parse(input, thicket::vm::ParseOptions::new().root("name"))
    }
}

impl std::ops::Deref for GreetingParser {
    type Target = thicket::vm::CompiledParser;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for GreetingParser {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

pub mod greeting {
    pub type Parser = super::GreetingParser;
}
