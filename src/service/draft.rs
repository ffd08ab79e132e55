/// One of the three inputs of the add form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Url,
    Title,
    Description,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Url, Field::Title, Field::Description];

    pub fn next(self) -> Self {
        match self {
            Field::Url => Field::Title,
            Field::Title => Field::Description,
            Field::Description => Field::Url,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Url => Field::Description,
            Field::Title => Field::Url,
            Field::Description => Field::Title,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Url => "Ссылка",
            Field::Title => "Название",
            Field::Description => "Описание",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Url => "https://example.com",
            Field::Title => "Название сайта или ресурса",
            Field::Description => "Краткое описание содержимого или почему эта ссылка полезна...",
        }
    }
}

/// Uncommitted values of the add form.
///
/// Values are stored as typed; nothing is trimmed or validated until submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub url: String,
    pub title: String,
    pub description: String,
    pub focused: Field,
}

impl Default for Draft {
    fn default() -> Self {
        Draft {
            url: String::new(),
            title: String::new(),
            description: String::new(),
            focused: Field::Url,
        }
    }
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Url => &self.url,
            Field::Title => &self.title,
            Field::Description => &self.description,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Url => &mut self.url,
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
        }
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    pub fn push_char(&mut self, c: char) {
        let focused = self.focused;
        self.field_mut(focused).push(c);
    }

    pub fn pop_char(&mut self) {
        let focused = self.focused;
        self.field_mut(focused).pop();
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev();
    }

    /// Url and title both present
    pub fn is_complete(&self) -> bool {
        !self.url.is_empty() && !self.title.is_empty()
    }

    /// Clear all three values and move focus back to the first input
    pub fn reset(&mut self) {
        *self = Draft::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_on_url() {
        let draft = Draft::new();
        for field in Field::ALL {
            assert_eq!(draft.field(field), "");
        }
        assert_eq!(draft.focused, Field::Url);
        assert!(!draft.is_complete());
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let mut draft = Draft::new();
        draft.push_char('h');
        draft.focus_next();
        draft.push_char('T');
        draft.push_char('x');
        draft.pop_char();
        assert_eq!(draft.url, "h");
        assert_eq!(draft.title, "T");
    }

    #[test]
    fn focus_wraps_both_ways() {
        assert_eq!(Field::Description.next(), Field::Url);
        assert_eq!(Field::Url.prev(), Field::Description);
    }

    #[test]
    fn whitespace_counts_as_present() {
        let mut draft = Draft::new();
        draft.set_field(Field::Url, " ");
        draft.set_field(Field::Title, " ");
        assert!(draft.is_complete());
    }

    #[test]
    fn reset_clears_everything() {
        let mut draft = Draft::new();
        draft.set_field(Field::Description, "d");
        draft.focus_prev();
        draft.reset();
        assert_eq!(draft, Draft::default());
    }
}
