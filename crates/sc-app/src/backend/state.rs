use crate::generator::Generator;

pub struct GenState {
    generator: Generator,
}

impl GenState {
    pub fn new(generator: Generator) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }
}
