//! Widget Host
//!
//! Hands chart and table payloads to the libraries the page loaded
//! (Chart.js, jQuery DataTables, Bootstrap) through their globals.

use js_sys::{Array, Function, Reflect, JSON};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use panelkit::widgets::{
    ChartRenderer, ColumnDef, Dataset, MountLookup, SortDirection, TableRenderer,
    TooltipInitializer,
};
use panelkit::{ChartConfig, ShellError, ShellResult, TableOptions, WidgetBootstrap};

use super::{by_id, query_all, window};

/// Widgets the dashboard pages may contain
pub fn dashboard_widgets() -> WidgetBootstrap {
    let months: Vec<String> = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"]
        .iter()
        .map(|m| m.to_string())
        .collect();

    WidgetBootstrap::new()
        .chart(
            "revenueChart",
            ChartConfig::line(months.clone()).dataset(
                Dataset::new("Revenue", vec![12_000.0, 19_000.0, 15_000.0, 25_000.0, 22_000.0, 30_000.0])
                    .fill(true)
                    .tension(0.3),
            ),
        )
        .chart(
            "ordersChart",
            ChartConfig::bar(months).dataset(Dataset::new(
                "Orders",
                vec![120.0, 190.0, 150.0, 250.0, 220.0, 300.0],
            )),
        )
        .chart(
            "trafficChart",
            ChartConfig::doughnut(vec![
                "Direct".to_string(),
                "Referral".to_string(),
                "Social".to_string(),
            ])
            .dataset(Dataset::new("Traffic", vec![55.0, 30.0, 15.0])),
        )
        .table(
            "dataTable",
            TableOptions::default()
                .page_length(10)
                .order_by(0, SortDirection::Desc)
                .column(ColumnDef::inert(vec![-1])),
        )
        .table("recentTable", TableOptions::compact())
}

/// Library host for the live page
pub struct PageWidgets;

fn js_error(err: JsValue) -> ShellError {
    ShellError::Widget(format!("{:?}", err))
}

/// A global the page defined, if it is present
fn global(name: &str) -> Option<JsValue> {
    let window = window()?;
    Reflect::get(&window, &JsValue::from_str(name))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

fn function(owner: &JsValue, name: &str) -> ShellResult<Function> {
    Reflect::get(owner, &JsValue::from_str(name))
        .map_err(js_error)?
        .dyn_into::<Function>()
        .map_err(|_| ShellError::Widget(format!("{} is not loaded", name)))
}

fn to_js(payload: &serde_json::Value) -> ShellResult<JsValue> {
    JSON::parse(&payload.to_string()).map_err(js_error)
}

fn mount(mount_id: &str) -> ShellResult<JsValue> {
    by_id(mount_id)
        .map(JsValue::from)
        .ok_or_else(|| ShellError::ElementNotFound(mount_id.to_string()))
}

impl PageWidgets {
    /// Construct `bootstrap.<component>` on every `[data-bs-toggle=<toggle>]`
    fn init_bootstrap(&self, component: &str, toggle: &str) -> ShellResult<usize> {
        let bootstrap = global("bootstrap")
            .ok_or_else(|| ShellError::Widget("bootstrap is not loaded".to_string()))?;
        let ctor = function(&bootstrap, component)?;

        let elements = query_all(&format!("[data-bs-toggle=\"{}\"]", toggle));
        for element in &elements {
            Reflect::construct(&ctor, &Array::of1(element)).map_err(js_error)?;
        }
        Ok(elements.len())
    }
}

impl MountLookup for PageWidgets {
    fn has_mount(&self, id: &str) -> bool {
        by_id(id).is_some()
    }
}

impl ChartRenderer for PageWidgets {
    fn render_chart(&mut self, mount_id: &str, config: &serde_json::Value) -> ShellResult<()> {
        let chart = global("Chart")
            .ok_or_else(|| ShellError::Widget("Chart.js is not loaded".to_string()))?
            .dyn_into::<Function>()
            .map_err(|_| ShellError::Widget("Chart is not a constructor".to_string()))?;

        Reflect::construct(&chart, &Array::of2(&mount(mount_id)?, &to_js(config)?))
            .map_err(js_error)?;
        Ok(())
    }
}

impl TableRenderer for PageWidgets {
    fn init_table(&mut self, mount_id: &str, options: &serde_json::Value) -> ShellResult<()> {
        let jquery = global("jQuery")
            .ok_or_else(|| ShellError::Widget("jQuery is not loaded".to_string()))?
            .dyn_into::<Function>()
            .map_err(|_| ShellError::Widget("jQuery is not a function".to_string()))?;

        let wrapped = jquery.call1(&JsValue::NULL, &mount(mount_id)?).map_err(js_error)?;
        function(&wrapped, "DataTable")?
            .call1(&wrapped, &to_js(options)?)
            .map_err(js_error)?;
        Ok(())
    }
}

impl TooltipInitializer for PageWidgets {
    fn init_tooltips(&mut self) -> ShellResult<usize> {
        self.init_bootstrap("Tooltip", "tooltip")
    }

    fn init_popovers(&mut self) -> ShellResult<usize> {
        self.init_bootstrap("Popover", "popover")
    }
}
