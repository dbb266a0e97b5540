pub mod act;
pub mod source;

pub use act::{ActionSpace, ToCommand, BOOST_AXIS, PITCH_AXIS, YAW_AXIS};
pub use source::{
    CommandSource, ExternalPolicy, HeuristicPilot, IdleSource, PilotContext, PolicyHandle,
    ScriptedCommands,
};
