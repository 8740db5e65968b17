//! In-memory model of the slots page. Every element is optional, the same
//! way a page may or may not carry a given id.

use indexmap::IndexMap;

pub const TABLE_BODY_ID: &str = "slots-table-body";
pub const REFRESH_BUTTON_ID: &str = "refresh-slots-btn";
pub const FILTERS_FORM_ID: &str = "filters-form";
pub const APPLY_BUTTON_ID: &str = "apply-filters-btn";
pub const RESET_BUTTON_ID: &str = "reset-filters-btn";
pub const FREE_ONLY_ID: &str = "freeOnly";

/// Named fields of the filters form, in form order.
pub const FILTER_FIELDS: [&str; 5] = ["date", "time_from", "time_to", "min_duration", "club"];

#[derive(Debug, Clone, Default)]
pub struct TableBody {
    pub inner_html: String,
}

#[derive(Debug, Clone)]
pub struct Button {
    pub label: String,
    pub disabled: bool,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormField {
    pub value: String,
    pub default_value: String,
}

impl FormField {
    pub fn with_default(default_value: impl Into<String>) -> Self {
        let default_value = default_value.into();
        Self {
            value: default_value.clone(),
            default_value,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Checkbox {
    pub checked: bool,
    pub default_checked: bool,
}

impl Checkbox {
    pub fn with_default(default_checked: bool) -> Self {
        Self {
            checked: default_checked,
            default_checked,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterForm {
    fields: IndexMap<String, FormField>,
}

impl FilterForm {
    /// A form carrying all filter fields with empty defaults.
    pub fn standard() -> Self {
        let mut form = Self::default();
        for name in FILTER_FIELDS {
            form.add_field(name, "");
        }
        form
    }

    pub fn add_field(&mut self, name: impl Into<String>, default_value: impl Into<String>) {
        self.fields
            .insert(name.into(), FormField::with_default(default_value));
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|field| field.value.as_str())
    }

    /// Sets the current value of an existing field. Unknown names are ignored.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(name) {
            field.value = value.into();
        }
    }

    fn reset_fields(&mut self) {
        for field in self.fields.values_mut() {
            field.value = field.default_value.clone();
        }
    }
}

/// The page state the board reads and writes.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub table_body: Option<TableBody>,
    pub refresh_button: Option<Button>,
    pub filters_form: Option<FilterForm>,
    pub apply_button: Option<Button>,
    pub reset_button: Option<Button>,
    pub free_only: Option<Checkbox>,
}

impl Page {
    /// The page as served at `/`: every element present with its declared
    /// defaults.
    pub fn standard() -> Self {
        Self {
            table_body: Some(TableBody::default()),
            refresh_button: Some(Button::new("Refresh statuses")),
            filters_form: Some(FilterForm::standard()),
            apply_button: Some(Button::new("Apply filters")),
            reset_button: Some(Button::new("Reset")),
            free_only: Some(Checkbox::with_default(false)),
        }
    }

    /// Native form reset: fields and the `freeOnly` checkbox, which lives
    /// inside the form, return to their declared defaults.
    pub fn reset_form(&mut self) {
        let Some(form) = self.filters_form.as_mut() else {
            return;
        };
        form.reset_fields();
        if let Some(checkbox) = self.free_only.as_mut() {
            checkbox.checked = checkbox.default_checked;
        }
    }

    pub fn table_html(&self) -> Option<&str> {
        self.table_body.as_ref().map(|body| body.inner_html.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_restores_declared_defaults_not_empty_values() {
        let mut page = Page::standard();
        let form = page.filters_form.as_mut().unwrap();
        form.add_field("club", "Central");
        form.set("club", "North");
        form.set("date", "2024-05-01");
        page.free_only = Some(Checkbox::with_default(true));
        page.free_only.as_mut().unwrap().checked = false;

        page.reset_form();

        let form = page.filters_form.as_ref().unwrap();
        assert_eq!(form.value("club"), Some("Central"));
        assert_eq!(form.value("date"), Some(""));
        assert!(page.free_only.as_ref().unwrap().checked);
    }

    #[test]
    fn setting_unknown_field_is_ignored() {
        let mut form = FilterForm::standard();
        form.set("court", "7");
        assert_eq!(form.value("court"), None);
    }
}
