use crate::domain::models::Capability;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Toggle(Capability, bool),
    Execute(String),
    CheckHealth,
    LoadAvailableCommands,
}
