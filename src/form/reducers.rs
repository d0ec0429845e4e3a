use crate::tree::Scalar;

use super::{
    actions::FormCommand,
    binding::ChoiceField,
    error::FormError,
    state::{FormModel, SubmitOutcome, log_submission},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied { changed: bool },
    Submitted(SubmitOutcome),
}

pub fn apply_command(
    model: &mut FormModel,
    command: FormCommand,
) -> Result<CommandOutcome, FormError> {
    let changed = match command {
        FormCommand::Set { path, value } => model.set_value(&path, Scalar::Text(value))?,
        FormCommand::Clear { path } => model.set_value(&path, Scalar::Null)?,
        FormCommand::Choose { path, label } => {
            ChoiceField::for_path(path, "")?.select_label(model, &label)?
        }
        FormCommand::Touch { path } => model.touch(&path)?,
        FormCommand::Append { group } => {
            model.append(&group)?;
            true
        }
        FormCommand::Remove { group, index } => model.remove_at(&group, index),
        FormCommand::Submit => {
            return model.submit(log_submission).map(CommandOutcome::Submitted);
        }
    };
    Ok(CommandOutcome::Applied { changed })
}

impl FormModel {
    /// Apply `command` only if nobody changed the values since the caller
    /// observed revision `expected`.
    pub fn apply_if_revision(
        &mut self,
        expected: u64,
        command: FormCommand,
    ) -> Result<CommandOutcome, FormError> {
        self.check_revision(expected)?;
        apply_command(self, command)
    }
}
