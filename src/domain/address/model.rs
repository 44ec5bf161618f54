use crate::domain::billboard::Billboard;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Address {
    pub id: i32,
    pub name: String,
    /// The billboard standing at this address, if loaded
    pub billboard: Option<Box<Billboard>>,
}

impl Address {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            billboard: None,
        }
    }
}
