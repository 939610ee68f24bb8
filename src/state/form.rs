//! Add-site form state.

use super::record::NewSite;
use crate::error::Result;

/// Which input currently receives keystrokes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Name,
    Url,
}

#[derive(Debug, Clone, Default)]
pub struct AddSiteForm {
    pub open: bool,
    pub name: String,
    pub url: String,
    pub focus: FormField,
    pub error: Option<String>,
    /// A create request is in flight.
    pub submitting: bool,
}

impl AddSiteForm {
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close the dialog, discarding whatever was typed.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Url => &mut self.url,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Name => FormField::Url,
            FormField::Url => FormField::Name,
        };
    }

    pub fn push_char(&mut self, c: char) {
        if !self.submitting {
            self.focused_mut().push(c);
        }
    }

    pub fn backspace(&mut self) {
        if !self.submitting {
            self.focused_mut().pop();
        }
    }

    /// Validate the current input, recording the message inline on failure.
    pub fn validate(&mut self) -> Result<NewSite> {
        NewSite::parse(&self.name, &self.url).map_err(|err| {
            self.error = Some(err.user_message());
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_goes_to_focused_field() {
        let mut form = AddSiteForm::default();
        form.open();
        "Example".chars().for_each(|c| form.push_char(c));
        form.toggle_focus();
        "example.com".chars().for_each(|c| form.push_char(c));
        form.backspace();

        assert_eq!(form.name, "Example");
        assert_eq!(form.url, "example.co");
    }

    #[test]
    fn validation_failure_sets_inline_error() {
        let mut form = AddSiteForm {
            open: true,
            url: "example.com".into(),
            ..Default::default()
        };

        assert!(form.validate().is_err());
        assert_eq!(form.error.as_deref(), Some("Both name and URL are required"));
        assert_eq!(form.url, "example.com");
    }

    #[test]
    fn input_is_locked_while_submitting() {
        let mut form = AddSiteForm {
            name: "a".into(),
            submitting: true,
            ..Default::default()
        };
        form.push_char('b');
        form.backspace();
        assert_eq!(form.name, "a");
    }

    #[test]
    fn close_resets_everything() {
        let mut form = AddSiteForm {
            open: true,
            name: "a".into(),
            url: "b".into(),
            error: Some("boom".into()),
            ..Default::default()
        };
        form.close();
        assert!(!form.open);
        assert!(form.name.is_empty() && form.url.is_empty() && form.error.is_none());
    }
}
