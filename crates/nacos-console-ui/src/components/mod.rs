pub(crate) mod binding_dialog;
pub(crate) mod login;
pub(crate) mod shell;
