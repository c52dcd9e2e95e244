pub mod agent_options;
pub mod jboss;
pub mod remote_exec;
