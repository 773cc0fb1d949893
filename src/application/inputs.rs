#[cfg(test)]
#[path = "inputs_test.rs"]
mod tests;

use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::AuthMode;
use crate::domain::models::TextArea;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
    Token,
    Draft,
}

impl Field {
    pub fn title(&self) -> &'static str {
        match self {
            Field::Email => return "Email",
            Field::Password => return "Password",
            Field::Token => return "Google ID token",
            Field::Draft => return "Message",
        }
    }

    pub fn placeholder(&self, auth_mode: AuthMode) -> &'static str {
        match (self, auth_mode) {
            (Field::Email, _) => return "you@company.com",
            (Field::Password, AuthMode::SignIn) => return "••••••••",
            (Field::Password, AuthMode::Register) => return "Create a password",
            (Field::Token, _) => return "Paste a credential and press Enter",
            (Field::Draft, _) => return "Draft a reply to the last email from Dana...",
        }
    }

    fn is_multiline(&self) -> bool {
        return *self == Field::Draft;
    }
}

/// Every text field of both screens. The sign-in and register forms keep
/// separate email and password values.
pub struct Inputs<'a> {
    pub draft: tui_textarea::TextArea<'a>,
    pub email: tui_textarea::TextArea<'a>,
    pub focus: Field,
    pub password: tui_textarea::TextArea<'a>,
    pub register_email: tui_textarea::TextArea<'a>,
    pub register_password: tui_textarea::TextArea<'a>,
    pub token: tui_textarea::TextArea<'a>,
}

impl<'a> Default for Inputs<'a> {
    fn default() -> Inputs<'a> {
        return Inputs {
            draft: TextArea::new(Field::Draft.title(), false),
            email: TextArea::new(Field::Email.title(), false),
            focus: Field::Email,
            password: TextArea::new(Field::Password.title(), false),
            register_email: TextArea::new(Field::Email.title(), false),
            register_password: TextArea::new(Field::Password.title(), false),
            token: TextArea::new(Field::Token.title(), false),
        };
    }
}

impl<'a> Inputs<'a> {
    /// Fields reachable with Tab on the current screen, in order.
    pub fn fields(signed_in: bool, with_token: bool) -> Vec<Field> {
        if signed_in {
            return vec![Field::Draft];
        }

        let mut fields = vec![Field::Email, Field::Password];
        if with_token {
            fields.push(Field::Token);
        }

        return fields;
    }

    pub fn textarea(&self, field: Field, auth_mode: AuthMode) -> &tui_textarea::TextArea<'a> {
        match (field, auth_mode) {
            (Field::Email, AuthMode::SignIn) => return &self.email,
            (Field::Email, AuthMode::Register) => return &self.register_email,
            (Field::Password, AuthMode::SignIn) => return &self.password,
            (Field::Password, AuthMode::Register) => return &self.register_password,
            (Field::Token, _) => return &self.token,
            (Field::Draft, _) => return &self.draft,
        }
    }

    fn textarea_mut(
        &mut self,
        field: Field,
        auth_mode: AuthMode,
    ) -> &mut tui_textarea::TextArea<'a> {
        match (field, auth_mode) {
            (Field::Email, AuthMode::SignIn) => return &mut self.email,
            (Field::Email, AuthMode::Register) => return &mut self.register_email,
            (Field::Password, AuthMode::SignIn) => return &mut self.password,
            (Field::Password, AuthMode::Register) => return &mut self.register_password,
            (Field::Token, _) => return &mut self.token,
            (Field::Draft, _) => return &mut self.draft,
        }
    }

    /// Moves focus onto the current screen when it changed, and restyles
    /// every field to match.
    pub fn sync(&mut self, signed_in: bool, with_token: bool) {
        let fields = Inputs::fields(signed_in, with_token);
        if !fields.contains(&self.focus) {
            self.focus = fields[0];
        }

        let focus = self.focus;
        for (field, textarea) in [
            (Field::Draft, &mut self.draft),
            (Field::Email, &mut self.email),
            (Field::Password, &mut self.password),
            (Field::Email, &mut self.register_email),
            (Field::Password, &mut self.register_password),
            (Field::Token, &mut self.token),
        ] {
            TextArea::set_focus(textarea, field.title(), field == focus);
        }
    }

    pub fn focus_next(&mut self, signed_in: bool, with_token: bool) {
        let fields = Inputs::fields(signed_in, with_token);
        let idx = fields
            .iter()
            .position(|field| return *field == self.focus)
            .map_or(0, |idx| return (idx + 1) % fields.len());

        self.focus = fields[idx];
        self.sync(signed_in, with_token);
    }

    pub fn input(&mut self, input: Input, auth_mode: AuthMode) {
        let field = self.focus;
        if matches!(input.key, Key::Enter) && !field.is_multiline() {
            return;
        }

        self.textarea_mut(field, auth_mode).input(input);
    }

    pub fn paste(&mut self, text: &str, auth_mode: AuthMode) {
        let field = self.focus;
        let mut text = text.replace('\r', "");
        if !field.is_multiline() {
            text = text.replace('\n', "");
        }

        let textarea = self.textarea_mut(field, auth_mode);
        for (idx, line) in text.split('\n').enumerate() {
            if idx > 0 {
                textarea.insert_newline();
            }
            textarea.insert_str(line);
        }
    }

    pub fn text(&self, field: Field, auth_mode: AuthMode) -> String {
        return TextArea::text(self.textarea(field, auth_mode));
    }

    pub fn clear(&mut self, field: Field) {
        let focused = self.focus == field;
        let textarea = TextArea::new(field.title(), focused);
        match field {
            Field::Draft => self.draft = textarea,
            Field::Token => self.token = textarea,
            Field::Email => self.email = textarea,
            Field::Password => self.password = textarea,
        }
    }
}
