/*!
Command modules. Each exposes `execute_*` returning the process exit
status as `anyhow::Result<i32>`; `Err` is reserved for failures of the
onboarder itself (unwritable file, unspawnable program).

  doctor.rs     prerequisite check
  templates.rs  templates / env-template
  add.rs        mcporter config add
  verify.rs     mcporter list
  nocodb.rs     nocodb-link / nocodb-create-token
  format.rs     human output helpers
*/

pub mod add;
pub mod doctor;
pub mod format;
pub mod nocodb;
pub mod templates;
pub mod verify;

pub use add::{AddArgs, execute_add};
pub use doctor::execute_doctor;
pub use nocodb::{CreateTokenArgs, LinkArgs, execute_create_token, execute_link};
pub use templates::{EnvTemplateArgs, TemplatesArgs, execute_env_template, execute_templates};
pub use verify::{VerifyArgs, execute_verify};
