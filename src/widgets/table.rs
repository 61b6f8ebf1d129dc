//! Data-table payloads
//!
//! Options object for the page's data-table plugin (DataTables shape).

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Per-column overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    pub targets: Vec<i32>,
    pub orderable: bool,
    pub searchable: bool,
}

impl ColumnDef {
    /// Column that is neither sortable nor searchable (action buttons)
    pub fn inert(targets: Vec<i32>) -> Self {
        Self {
            targets,
            orderable: false,
            searchable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableLanguage {
    pub search: String,
    #[serde(rename = "lengthMenu")]
    pub length_menu: String,
    pub info: String,
    #[serde(rename = "emptyTable")]
    pub empty_table: String,
}

impl Default for TableLanguage {
    fn default() -> Self {
        Self {
            search: "Search:".to_string(),
            length_menu: "Show _MENU_ entries".to_string(),
            info: "Showing _START_ to _END_ of _TOTAL_ entries".to_string(),
            empty_table: "No data available".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOptions {
    pub paging: bool,
    pub page_length: u32,
    pub length_change: bool,
    pub ordering: bool,
    pub searching: bool,
    pub info: bool,
    pub responsive: bool,
    /// `[[column, "asc"|"desc"], ...]`
    pub order: Vec<(u32, SortDirection)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub column_defs: Vec<ColumnDef>,
    pub language: TableLanguage,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            paging: true,
            page_length: 10,
            length_change: true,
            ordering: true,
            searching: true,
            info: true,
            responsive: true,
            order: vec![(0, SortDirection::Asc)],
            column_defs: Vec::new(),
            language: TableLanguage::default(),
        }
    }
}

impl TableOptions {
    pub fn page_length(mut self, page_length: u32) -> Self {
        self.page_length = page_length.max(1);
        self
    }

    pub fn order_by(mut self, column: u32, direction: SortDirection) -> Self {
        self.order = vec![(column, direction)];
        self
    }

    pub fn column(mut self, def: ColumnDef) -> Self {
        self.column_defs.push(def);
        self
    }

    /// Small tables: no paging, search or info bar
    pub fn compact() -> Self {
        Self {
            paging: false,
            length_change: false,
            searching: false,
            info: false,
            ..Self::default()
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_shape() {
        let json = TableOptions::default()
            .page_length(25)
            .order_by(2, SortDirection::Desc)
            .column(ColumnDef::inert(vec![-1]))
            .to_json();

        assert_eq!(json["pageLength"], 25);
        assert_eq!(json["order"], serde_json::json!([[2, "desc"]]));
        assert_eq!(json["columnDefs"][0]["targets"], serde_json::json!([-1]));
        assert_eq!(json["columnDefs"][0]["orderable"], false);
        assert_eq!(json["language"]["lengthMenu"], "Show _MENU_ entries");
    }

    #[test]
    fn test_compact() {
        let json = TableOptions::compact().to_json();
        assert_eq!(json["paging"], false);
        assert_eq!(json["ordering"], true);
        assert!(json.get("columnDefs").is_none());
        assert_eq!(TableOptions::default().page_length(0).page_length, 1);
    }
}
