//! Layout engine.
//!
//! [`plan`] is a pure function from `(geometry, config, art, snapshot)` to
//! a [`LayoutPlan`]. It never touches the terminal. Every widget is placed
//! at its final coordinates and clipped by character count before the
//! renderer sees it; widgets that do not fit the current geometry are
//! skipped outright, so partial screens on small terminals are expected
//! output, not errors.

use chrono::{Local, TimeZone};

use crate::config::DisplayConfig;
use crate::fmt::format_bytes;
use crate::model::{GpuUsage, Snapshot};
use crate::util::{char_len, truncate_chars};

use super::{BarWidget, LayoutPlan, TextRole, TextWidget, Widget, info_column, status_role};

const TITLE: &str = "livefetch - live system monitor";
const HELP_TEXT: &str = "Press 'q' to quit, 'c' to toggle system info, 'w' to save config";

/// Requested progress bar width before shrinking to fit.
const MAX_BAR_WIDTH: u16 = 40;
/// Bars narrower than this are omitted rather than drawn illegibly.
const MIN_BAR_WIDTH: u16 = 5;
/// Column offset (from the info column) of bars drawn beside their label.
const BAR_COLUMN: u16 = 20;
/// Indent (from the info column) of bars drawn on the row below a label.
const BAR_INDENT: u16 = 2;

/// Computes the widget plan for one tick.
pub fn plan(
    geometry: (u16, u16),
    config: &DisplayConfig,
    art: &str,
    snapshot: &Snapshot,
) -> LayoutPlan {
    let (width, height) = geometry;
    let mut b = PlanBuilder::new(width, height);
    if width == 0 || height == 0 {
        return b.finish();
    }

    // ASCII art block: columns [0, ascii_width), rows [0, min(lines, height)).
    let art_lines: Vec<&str> = if config.show_ascii {
        art.lines().collect()
    } else {
        Vec::new()
    };
    let ascii_width = art_lines.iter().map(|l| char_len(l)).max().unwrap_or(0) as u16;
    for (row, line) in art_lines.iter().take(height as usize).enumerate() {
        b.text(0, row as u16, line, TextRole::Ascii, false);
    }

    // Title, centered on row 0, drawn over the art.
    let title_len = char_len(TITLE) as u16;
    let title_x = if title_len >= width {
        0
    } else {
        (width - title_len) / 2
    };
    b.text(title_x, 0, TITLE, TextRole::Title, true);

    let info_x = info_column(ascii_width, width);
    let mut y: u16 = 2;

    if config.show_system_info {
        if b.fits(y) {
            b.text(info_x, y, "SYSTEM INFORMATION", TextRole::Label, true);
            y += 1;
        }
        for (label, value) in snapshot.system.lines() {
            if !b.fits(y) {
                break;
            }
            b.labeled(info_x, y, &format!("{}: ", label), &value, TextRole::Value);
            y += 1;
        }
        y += 1;
    }

    if config.show_resources {
        plan_resources(&mut b, snapshot, info_x, y);
    }

    // Clock and help are anchored to the bottom rows and exempt from the
    // fits() rule; the builder still bounds-checks them.
    if config.show_clock && height >= 2 {
        if let Some(time) = Local.timestamp_opt(snapshot.timestamp, 0).single() {
            let clock = time.format("%Y-%m-%d %H:%M:%S").to_string();
            let clock_x = width.saturating_sub(char_len(&clock) as u16 + 1);
            b.text(clock_x, height - 2, &clock, TextRole::Title, true);
        }
    }
    b.text(0, height - 1, HELP_TEXT, TextRole::Help, false);

    b.finish()
}

/// Lays out the resource section starting at row `y`; returns the next row.
fn plan_resources(b: &mut PlanBuilder, snapshot: &Snapshot, info_x: u16, mut y: u16) -> u16 {
    let res = &snapshot.resources;

    if b.fits(y) {
        b.text(info_x, y, "RESOURCE USAGE", TextRole::Label, true);
        y += 1;
    }

    // CPU: overall, then per-core, then load averages.
    if b.fits(y) {
        let value = format!("{:.1}%", res.cpu.percent);
        b.labeled(info_x, y, "CPU Usage: ", &value, status_role(res.cpu.percent));
        b.side_bar(info_x, y, res.cpu.percent);
        y += 1;
    }
    for (core, percent) in res.cpu.per_core.iter().enumerate() {
        if !b.fits(y) {
            break;
        }
        let label = format!("Core {}: ", core);
        b.labeled(info_x, y, &label, &format!("{:.1}%", percent), status_role(*percent));
        b.side_bar(info_x, y, *percent);
        y += 1;
    }
    if let Some(load) = res.cpu.load_avg {
        if b.fits(y) {
            let value = format!("{:.2} {:.2} {:.2}", load.one, load.five, load.fifteen);
            b.labeled(info_x, y, "Load Avg: ", &value, TextRole::Info);
            y += 1;
        }
    }

    // Memory, swap: capacity line with the bar on the row below.
    let mem = &res.memory;
    if b.fits(y) {
        let value = format!(
            "{} / {} ({:.1}%)",
            format_bytes(mem.used),
            format_bytes(mem.total),
            mem.percent
        );
        b.labeled(info_x, y, "Memory: ", &value, status_role(mem.percent));
        y += 1;
        if b.fits(y) {
            b.below_bar(info_x, y, mem.percent);
            y += 1;
        }
    }
    if let Some(swap) = &mem.swap {
        if b.fits(y) {
            let value = format!(
                "{} / {} ({:.1}%)",
                format_bytes(swap.used),
                format_bytes(swap.total),
                swap.percent
            );
            b.labeled(info_x, y, "Swap: ", &value, status_role(swap.percent));
            y += 1;
            if b.fits(y) {
                b.below_bar(info_x, y, swap.percent);
                y += 1;
            }
        }
    }

    for disk in &res.disks {
        if !b.fits(y) {
            break;
        }
        let label = format!("Disk {}: ", disk.mount);
        let value = format!(
            "{} / {} ({:.1}%)",
            format_bytes(disk.used),
            format_bytes(disk.total),
            disk.percent
        );
        b.labeled(info_x, y, &label, &value, status_role(disk.percent));
        y += 1;
        if b.fits(y) {
            b.below_bar(info_x, y, disk.percent);
            y += 1;
        }
    }

    if let Some(gpus) = &res.gpus {
        for gpu in gpus {
            y = plan_gpu(b, gpu, info_x, y);
        }
    }

    y + 1
}

/// Lays out one GPU entry; returns the next row.
fn plan_gpu(b: &mut PlanBuilder, gpu: &GpuUsage, info_x: u16, mut y: u16) -> u16 {
    if !b.fits(y) {
        return y;
    }
    let name = match gpu.temperature_c {
        Some(temp) => format!("{} ({}°C)", gpu.name, temp),
        None => gpu.name.clone(),
    };
    b.labeled(info_x, y, "GPU: ", &name, TextRole::Info);
    y += 1;

    if b.fits(y) {
        let value = format!("{:.1}%", gpu.load_percent);
        b.labeled(info_x, y, "GPU Usage: ", &value, status_role(gpu.load_percent));
        b.side_bar(info_x, y, gpu.load_percent);
        y += 1;
    }
    if b.fits(y) {
        let value = format!(
            "{} / {} ({:.1}%)",
            format_bytes(gpu.mem_used),
            format_bytes(gpu.mem_total),
            gpu.mem_percent
        );
        b.labeled(info_x, y, "GPU Memory: ", &value, status_role(gpu.mem_percent));
        y += 1;
        if b.fits(y) {
            b.below_bar(info_x, y, gpu.mem_percent);
            y += 1;
        }
    }
    y
}

/// Accumulates widgets, clipping every placement to the geometry.
struct PlanBuilder {
    width: u16,
    height: u16,
    widgets: Vec<Widget>,
}

impl PlanBuilder {
    fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            widgets: Vec::new(),
        }
    }

    /// Whether a section row may be placed at `y` (last row is reserved
    /// for the help line).
    fn fits(&self, y: u16) -> bool {
        y < self.height.saturating_sub(1)
    }

    /// Pushes a text widget clipped to the remaining width. Clipping is by
    /// character count; the last column stays free. No-op when nothing of
    /// the text would remain visible.
    fn text(&mut self, x: u16, y: u16, text: &str, role: TextRole, bold: bool) {
        if y >= self.height || x >= self.width {
            return;
        }
        let max_chars = usize::from(self.width - x).saturating_sub(1);
        if max_chars == 0 {
            return;
        }
        let clipped = truncate_chars(text, max_chars);
        if clipped.is_empty() {
            return;
        }
        self.widgets.push(Widget::Text(TextWidget {
            x,
            y,
            text: clipped,
            role,
            bold,
        }));
    }

    /// Label in the label color followed by a value in `value_role`.
    fn labeled(&mut self, x: u16, y: u16, label: &str, value: &str, value_role: TextRole) {
        self.text(x, y, label, TextRole::Label, false);
        let value_x = x.saturating_add(char_len(label) as u16);
        self.text(value_x, y, value, value_role, false);
    }

    /// Bar beside its label, at a fixed column offset.
    fn side_bar(&mut self, info_x: u16, y: u16, percent: f64) {
        self.bar(info_x.saturating_add(BAR_COLUMN), y, percent);
    }

    /// Bar on the row below its label, slightly indented.
    fn below_bar(&mut self, info_x: u16, y: u16, percent: f64) {
        self.bar(info_x.saturating_add(BAR_INDENT), y, percent);
    }

    /// Pushes a bar shrunk to the remaining width; omitted entirely below
    /// the usability floor.
    fn bar(&mut self, x: u16, y: u16, percent: f64) {
        if y >= self.height || x >= self.width {
            return;
        }
        let width = MAX_BAR_WIDTH.min((self.width - x).saturating_sub(1));
        if width < MIN_BAR_WIDTH {
            return;
        }
        self.widgets.push(Widget::Bar(BarWidget {
            x,
            y,
            width,
            percent,
        }));
    }

    fn finish(self) -> LayoutPlan {
        LayoutPlan {
            widgets: self.widgets,
        }
    }
}
