use crate::entity::action::Action;
use crate::errors::SplitError;

pub(super) fn map_err_apply(
    err: SplitError,
    action_failed: Action,
    actions_performed: Vec<Action>,
) -> SplitError {
    SplitError::ApplyError {
        error: Box::new(err),
        action_failed: Box::new(action_failed),
        actions_performed,
    }
}
