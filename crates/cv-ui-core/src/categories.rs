//! Admin category rows: edit form targets and delete prompts.

use cv_api_types::{category_delete_path, category_update_path};

use crate::modal::{self, DialogOptions, DialogRequest};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryRow {
    pub id: i64,
    pub label: String,
    pub icon: String,
    pub item_count: u32,
}

impl CategoryRow {
    pub fn display_name(&self) -> String {
        if self.icon.is_empty() {
            self.label.clone()
        } else {
            format!("{} {}", self.icon, self.label)
        }
    }

    pub fn update_action(&self) -> String {
        category_update_path(self.id)
    }

    pub fn delete_action(&self) -> String {
        category_delete_path(self.id)
    }

    /// Categories still holding items can only go with `force=1`, which
    /// moves the items to "Other".
    pub fn needs_force(&self) -> bool {
        self.item_count > 0
    }

    pub fn delete_request(&self) -> DialogRequest {
        let mut opts = DialogOptions::default().title("Delete Category");
        if self.needs_force() {
            let noun = if self.item_count == 1 { "item" } else { "items" };
            opts = opts.message(format!(
                "This category is used by {} {}. They will be moved to \"Other\". This action cannot be undone.",
                self.item_count, noun
            ));
        }
        modal::confirm_delete(self.display_name(), opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::DEFAULT_DELETE_MESSAGE;

    fn row(item_count: u32) -> CategoryRow {
        CategoryRow {
            id: 12,
            label: "Canned Goods".to_owned(),
            icon: "\u{1f96b}".to_owned(),
            item_count,
        }
    }

    #[test]
    fn empty_category_uses_default_prompt() {
        let request = row(0).delete_request();
        assert_eq!(request.title, "Delete Category");
        assert_eq!(request.message, DEFAULT_DELETE_MESSAGE);
        assert_eq!(request.visible_subtitle(), Some("\u{1f96b} Canned Goods"));
        assert!(!row(0).needs_force());
    }

    #[test]
    fn used_category_warns_about_reassignment() {
        let category = row(3);
        assert!(category.needs_force());
        assert!(category.delete_request().message.contains("used by 3 items"));
        assert!(row(1).delete_request().message.contains("used by 1 item."));
    }

    #[test]
    fn form_actions() {
        assert_eq!(row(0).update_action(), "/web/admin/categories/12/update");
        assert_eq!(row(0).delete_action(), "/web/admin/categories/12/delete");
    }
}
