//! Widget Bootstrap
//!
//! Charts, data tables and tooltips are rendered by third-party libraries.
//! This module only builds their configuration payloads and hands them to
//! whichever mount points exist on the current page.

pub mod chart;
pub mod table;

pub use chart::{ChartConfig, ChartKind, ColorSpec, Dataset, SERIES_COLORS};
pub use table::{ColumnDef, SortDirection, TableLanguage, TableOptions};

use serde::Serialize;

use crate::error::ShellResult;

/// Element lookup for named mount points
pub trait MountLookup {
    fn has_mount(&self, id: &str) -> bool;
}

/// Charting library constructor
pub trait ChartRenderer {
    fn render_chart(&mut self, mount_id: &str, config: &serde_json::Value) -> ShellResult<()>;
}

/// Data-table plugin initialiser
pub trait TableRenderer {
    fn init_table(&mut self, mount_id: &str, options: &serde_json::Value) -> ShellResult<()>;
}

/// Tooltip/popover initialiser; returns how many elements were initialised
pub trait TooltipInitializer {
    fn init_tooltips(&mut self) -> ShellResult<usize>;
    fn init_popovers(&mut self) -> ShellResult<usize>;
}

/// What a bootstrap pass did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BootstrapReport {
    pub charts_rendered: usize,
    pub tables_initialised: usize,
    pub tooltips: usize,
    pub popovers: usize,
    /// Mount points absent from this page
    pub skipped: Vec<String>,
    /// Mount points whose library call failed, with the error
    pub failed: Vec<(String, String)>,
}

/// Page-level registry of widgets to initialise
#[derive(Debug, Clone, Default)]
pub struct WidgetBootstrap {
    charts: Vec<(String, ChartConfig)>,
    tables: Vec<(String, TableOptions)>,
}

impl WidgetBootstrap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chart(mut self, mount_id: impl Into<String>, config: ChartConfig) -> Self {
        self.charts.push((mount_id.into(), config));
        self
    }

    pub fn table(mut self, mount_id: impl Into<String>, options: TableOptions) -> Self {
        self.tables.push((mount_id.into(), options));
        self
    }

    /// Initialise every registered widget whose mount point exists.
    /// Missing mounts and library failures are logged and skipped.
    pub fn run<H>(&self, host: &mut H) -> BootstrapReport
    where
        H: MountLookup + ChartRenderer + TableRenderer + TooltipInitializer,
    {
        let mut report = BootstrapReport::default();

        match host.init_tooltips() {
            Ok(n) => report.tooltips = n,
            Err(e) => tracing::warn!("tooltip init failed: {}", e),
        }
        match host.init_popovers() {
            Ok(n) => report.popovers = n,
            Err(e) => tracing::warn!("popover init failed: {}", e),
        }

        for (mount_id, config) in &self.charts {
            if !host.has_mount(mount_id) {
                tracing::debug!(mount_id = %mount_id, "chart mount absent, skipping");
                report.skipped.push(mount_id.clone());
                continue;
            }
            let mismatched = config.mismatched_datasets();
            if !mismatched.is_empty() {
                tracing::warn!(mount_id = %mount_id, ?mismatched, "dataset length differs from label count");
            }
            match host.render_chart(mount_id, &config.to_json()) {
                Ok(()) => report.charts_rendered += 1,
                Err(e) => {
                    tracing::warn!(mount_id = %mount_id, "chart render failed: {}", e);
                    report.failed.push((mount_id.clone(), e.to_string()));
                }
            }
        }

        for (mount_id, options) in &self.tables {
            if !host.has_mount(mount_id) {
                tracing::debug!(mount_id = %mount_id, "table mount absent, skipping");
                report.skipped.push(mount_id.clone());
                continue;
            }
            match host.init_table(mount_id, &options.to_json()) {
                Ok(()) => report.tables_initialised += 1,
                Err(e) => {
                    tracing::warn!(mount_id = %mount_id, "table init failed: {}", e);
                    report.failed.push((mount_id.clone(), e.to_string()));
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShellError;
    use std::collections::HashSet;

    #[derive(Default)]
    struct FakeHost {
        mounts: HashSet<String>,
        charts: Vec<(String, serde_json::Value)>,
        tables: Vec<String>,
        broken_library: bool,
    }

    impl MountLookup for FakeHost {
        fn has_mount(&self, id: &str) -> bool {
            self.mounts.contains(id)
        }
    }

    impl ChartRenderer for FakeHost {
        fn render_chart(&mut self, mount_id: &str, config: &serde_json::Value) -> ShellResult<()> {
            if self.broken_library {
                return Err(ShellError::Widget("Chart is not defined".to_string()));
            }
            self.charts.push((mount_id.to_string(), config.clone()));
            Ok(())
        }
    }

    impl TableRenderer for FakeHost {
        fn init_table(&mut self, mount_id: &str, _options: &serde_json::Value) -> ShellResult<()> {
            self.tables.push(mount_id.to_string());
            Ok(())
        }
    }

    impl TooltipInitializer for FakeHost {
        fn init_tooltips(&mut self) -> ShellResult<usize> {
            Ok(4)
        }

        fn init_popovers(&mut self) -> ShellResult<usize> {
            Ok(1)
        }
    }

    fn bootstrap() -> WidgetBootstrap {
        WidgetBootstrap::new()
            .chart(
                "salesChart",
                ChartConfig::line(vec!["Jan".into(), "Feb".into()])
                    .dataset(Dataset::new("Sales", vec![3.0, 4.0])),
            )
            .chart("missingChart", ChartConfig::bar(vec![]))
            .table("ordersTable", TableOptions::default())
    }

    #[test]
    fn test_missing_mounts_are_skipped() {
        let mut host = FakeHost {
            mounts: ["salesChart", "ordersTable"].iter().map(|s| s.to_string()).collect(),
            ..FakeHost::default()
        };
        let report = bootstrap().run(&mut host);

        assert_eq!(report.charts_rendered, 1);
        assert_eq!(report.tables_initialised, 1);
        assert_eq!(report.tooltips, 4);
        assert_eq!(report.popovers, 1);
        assert_eq!(report.skipped, vec!["missingChart".to_string()]);
        assert_eq!(host.charts[0].1["type"], "line");
    }

    #[test]
    fn test_library_failure_is_not_fatal() {
        let mut host = FakeHost {
            mounts: ["salesChart", "ordersTable"].iter().map(|s| s.to_string()).collect(),
            broken_library: true,
            ..FakeHost::default()
        };
        let report = bootstrap().run(&mut host);

        assert_eq!(report.charts_rendered, 0);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.tables_initialised, 1);
    }
}
