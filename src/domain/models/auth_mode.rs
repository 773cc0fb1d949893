#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, strum::Display)]
pub enum AuthMode {
    #[default]
    #[strum(serialize = "Sign in")]
    SignIn,
    #[strum(serialize = "Register")]
    Register,
}

impl AuthMode {
    pub fn toggle(&self) -> AuthMode {
        match self {
            AuthMode::SignIn => return AuthMode::Register,
            AuthMode::Register => return AuthMode::SignIn,
        }
    }
}
