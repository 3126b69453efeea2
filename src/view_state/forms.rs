//! Form state for the input screens and dialogs.
//!
//! Each form owns its field values, which field has focus, and an
//! optional inline validation error. Key handlers feed characters into
//! the focused field; rendering reads the same state. Validation here
//! is the pre-network kind: failures never leave the form.

/// Focused field on the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

/// Login screen form.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    pub error: Option<String>,
}

impl LoginForm {
    /// Move focus to the next field (wraps).
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    /// Type a character into the focused field.
    pub fn input(&mut self, c: char) {
        self.error = None;
        match self.focus {
            LoginField::Email => self.email.push(c),
            LoginField::Password => self.password.push(c),
        }
    }

    /// Delete the last character of the focused field.
    pub fn backspace(&mut self) {
        self.error = None;
        match self.focus {
            LoginField::Email => self.email.pop(),
            LoginField::Password => self.password.pop(),
        };
    }

    /// Both fields are filled.
    pub fn is_submittable(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }

    /// Reset the form, keeping nothing.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Focused field on the register screen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RegisterField {
    #[default]
    Name,
    Email,
    Password,
}

/// Register screen form.
#[derive(Debug, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub focus: RegisterField,
    pub error: Option<String>,
}

impl RegisterForm {
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            RegisterField::Name => RegisterField::Email,
            RegisterField::Email => RegisterField::Password,
            RegisterField::Password => RegisterField::Name,
        };
    }

    pub fn input(&mut self, c: char) {
        self.error = None;
        match self.focus {
            RegisterField::Name => self.name.push(c),
            RegisterField::Email => self.email.push(c),
            RegisterField::Password => self.password.push(c),
        }
    }

    pub fn backspace(&mut self) {
        self.error = None;
        match self.focus {
            RegisterField::Name => self.name.pop(),
            RegisterField::Email => self.email.pop(),
            RegisterField::Password => self.password.pop(),
        };
    }

    pub fn is_submittable(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.password.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Focused field in the compose (create/edit post) dialog.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ComposeField {
    #[default]
    Title,
    Body,
    ImagePath,
}

/// Create/edit post dialog form.
///
/// `editing` holds the post id when the dialog edits an existing post;
/// the image path is only used when creating (edits change title and
/// body only).
#[derive(Debug, Default)]
pub struct ComposeForm {
    pub title: String,
    pub body: String,
    pub image_path: String,
    pub focus: ComposeField,
    pub error: Option<String>,
    pub editing: Option<i64>,
}

impl ComposeForm {
    /// Prepare the dialog for editing an existing post.
    pub fn for_edit(id: i64, title: &str, body: &str) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            editing: Some(id),
            ..Self::default()
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            ComposeField::Title => ComposeField::Body,
            // Edits have no image field to land on
            ComposeField::Body if self.editing.is_some() => ComposeField::Title,
            ComposeField::Body => ComposeField::ImagePath,
            ComposeField::ImagePath => ComposeField::Title,
        };
    }

    pub fn input(&mut self, c: char) {
        self.error = None;
        match self.focus {
            ComposeField::Title => self.title.push(c),
            ComposeField::Body => self.body.push(c),
            ComposeField::ImagePath => self.image_path.push(c),
        }
    }

    pub fn backspace(&mut self) {
        self.error = None;
        match self.focus {
            ComposeField::Title => self.title.pop(),
            ComposeField::Body => self.body.pop(),
            ComposeField::ImagePath => self.image_path.pop(),
        };
    }

    pub fn is_submittable(&self) -> bool {
        let base = !self.title.trim().is_empty() && !self.body.trim().is_empty();
        if self.editing.is_some() {
            base
        } else {
            base && !self.image_path.trim().is_empty()
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Focused field on the profile edit form.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ProfileField {
    #[default]
    Name,
    Email,
}

/// Profile screen form (only meaningful while editing).
#[derive(Debug, Default)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub focus: ProfileField,
    pub editing: bool,
    pub error: Option<String>,
}

impl ProfileForm {
    /// Enter edit mode seeded with the current values.
    pub fn start_editing(&mut self, name: &str, email: &str) {
        self.name = name.to_string();
        self.email = email.to_string();
        self.focus = ProfileField::Name;
        self.editing = true;
        self.error = None;
    }

    /// Leave edit mode, discarding changes.
    pub fn cancel(&mut self) {
        self.editing = false;
        self.error = None;
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            ProfileField::Name => ProfileField::Email,
            ProfileField::Email => ProfileField::Name,
        };
    }

    pub fn input(&mut self, c: char) {
        self.error = None;
        match self.focus {
            ProfileField::Name => self.name.push(c),
            ProfileField::Email => self.email.push(c),
        }
    }

    pub fn backspace(&mut self) {
        self.error = None;
        match self.focus {
            ProfileField::Name => self.name.pop(),
            ProfileField::Email => self.email.pop(),
        };
    }

    /// Whether the edited values differ from the given originals.
    pub fn is_changed(&self, name: &str, email: &str) -> bool {
        self.name != name || self.email != email
    }

    pub fn is_submittable(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty()
    }
}

/// Comment input under the post detail. `editing` holds the comment id
/// while rewording an existing comment.
#[derive(Debug, Default)]
pub struct CommentForm {
    pub text: String,
    pub editing: Option<i64>,
}

impl CommentForm {
    /// Seed the input for editing an existing comment.
    pub fn for_edit(&mut self, id: i64, text: &str) {
        self.text = text.to_string();
        self.editing = Some(id);
    }

    pub fn input(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn is_submittable(&self) -> bool {
        !self.text.trim().is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Focused field in the new-password step of the reset dialog.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ResetPasswordField {
    #[default]
    Password,
    Confirmation,
}

/// Input state for the password-reset dialogs. Which field is live
/// follows the [`crate::state::ResetFlow`] stage: email while idle,
/// code while awaiting the OTP, password pair after verification.
#[derive(Debug, Default)]
pub struct ResetForm {
    pub email: String,
    pub code: String,
    pub password: String,
    pub confirmation: String,
    pub focus: ResetPasswordField,
    pub error: Option<String>,
}

impl ResetForm {
    /// Type a character into the email field.
    pub fn input_email(&mut self, c: char) {
        self.error = None;
        self.email.push(c);
    }

    /// Type a digit into the code field; non-digits are dropped and the
    /// code is capped at six digits, matching the expected OTP shape.
    pub fn input_code(&mut self, c: char) {
        self.error = None;
        if c.is_ascii_digit() && self.code.chars().count() < 6 {
            self.code.push(c);
        }
    }

    /// Type a character into the focused password field.
    pub fn input_password(&mut self, c: char) {
        self.error = None;
        match self.focus {
            ResetPasswordField::Password => self.password.push(c),
            ResetPasswordField::Confirmation => self.confirmation.push(c),
        }
    }

    /// Toggle between password and confirmation.
    pub fn next_password_field(&mut self) {
        self.focus = match self.focus {
            ResetPasswordField::Password => ResetPasswordField::Confirmation,
            ResetPasswordField::Confirmation => ResetPasswordField::Password,
        };
    }

    /// The six-digit code is complete.
    pub fn code_complete(&self) -> bool {
        self.code.chars().count() == 6
    }

    /// Clear everything; used on cancel and on completion.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Clear only the code, keeping the email (used on resend).
    pub fn clear_code(&mut self) {
        self.code.clear();
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_form_focus_cycle_and_input() {
        let mut form = LoginForm::default();
        form.input('a');
        form.next_field();
        form.input('p');
        assert_eq!(form.email, "a");
        assert_eq!(form.password, "p");

        form.next_field();
        form.backspace();
        assert_eq!(form.email, "");
    }

    #[test]
    fn test_login_form_submittable() {
        let mut form = LoginForm::default();
        assert!(!form.is_submittable());
        form.email = "a@b.com".to_string();
        assert!(!form.is_submittable());
        form.password = "x".to_string();
        assert!(form.is_submittable());
    }

    #[test]
    fn test_input_clears_error() {
        let mut form = LoginForm {
            error: Some("bad".to_string()),
            ..Default::default()
        };
        form.input('a');
        assert!(form.error.is_none());
    }

    #[test]
    fn test_register_form_cycle() {
        let mut form = RegisterForm::default();
        assert_eq!(form.focus, RegisterField::Name);
        form.next_field();
        assert_eq!(form.focus, RegisterField::Email);
        form.next_field();
        assert_eq!(form.focus, RegisterField::Password);
        form.next_field();
        assert_eq!(form.focus, RegisterField::Name);
    }

    #[test]
    fn test_compose_form_create_requires_image() {
        let mut form = ComposeForm::default();
        form.title = "T".to_string();
        form.body = "B".to_string();
        assert!(!form.is_submittable());
        form.image_path = "/tmp/pic.png".to_string();
        assert!(form.is_submittable());
    }

    #[test]
    fn test_compose_form_edit_skips_image() {
        let form = ComposeForm::for_edit(5, "T", "B");
        assert_eq!(form.editing, Some(5));
        assert!(form.is_submittable());

        let mut form = form;
        form.focus = ComposeField::Body;
        form.next_field();
        assert_eq!(form.focus, ComposeField::Title);
    }

    #[test]
    fn test_profile_form_change_detection() {
        let mut form = ProfileForm::default();
        form.start_editing("A", "a@b.com");
        assert!(form.editing);
        assert!(!form.is_changed("A", "a@b.com"));
        form.input('!');
        assert!(form.is_changed("A", "a@b.com"));
    }

    #[test]
    fn test_comment_form_edit_seed() {
        let mut form = CommentForm::default();
        form.for_edit(9, "old");
        assert_eq!(form.editing, Some(9));
        assert_eq!(form.text, "old");
        form.clear();
        assert_eq!(form.editing, None);
        assert!(form.text.is_empty());
    }

    #[test]
    fn test_reset_form_code_digits_only_capped() {
        let mut form = ResetForm::default();
        for c in "12a34b5678".chars() {
            form.input_code(c);
        }
        assert_eq!(form.code, "123456");
        assert!(form.code_complete());
    }

    #[test]
    fn test_reset_form_clear_code_keeps_email() {
        let mut form = ResetForm::default();
        form.email = "a@b.com".to_string();
        form.code = "123".to_string();
        form.clear_code();
        assert!(form.code.is_empty());
        assert_eq!(form.email, "a@b.com");
    }

    #[test]
    fn test_reset_form_password_focus() {
        let mut form = ResetForm::default();
        form.input_password('A');
        form.next_password_field();
        form.input_password('B');
        assert_eq!(form.password, "A");
        assert_eq!(form.confirmation, "B");
    }
}
