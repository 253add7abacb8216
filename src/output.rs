//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ```text
//! 4x6 Layout → out/4x6_layout.jpg
//!     Size: 1200x1800 @ 300 DPI
//!     Format: JPEG (image/jpeg), 412.7 KiB
//! ```

use crate::tools::{Export, OperationKind};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Human-readable byte count.
fn format_size(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KIB {
        format!("{} B", bytes)
    } else if b < KIB * KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{:.1} MiB", b / (KIB * KIB))
    }
}

/// Describe a written export.
pub fn format_export(kind: OperationKind, export: &Export, path: &Path) -> Vec<String> {
    let (w, h) = export.dimensions;
    let size = match export.dpi {
        Some(dpi) => format!("{}x{} @ {} DPI", w, h, dpi),
        None => format!("{}x{}", w, h),
    };
    vec![
        format!("{} → {}", kind.label(), path.display()),
        format!("{}Size: {}", indent(1), size),
        format!(
            "{}Format: {} ({}), {}",
            indent(1),
            export.format.name(),
            export.mime(),
            format_size(export.bytes.len())
        ),
    ]
}

pub fn print_export(kind: OperationKind, export: &Export, path: &Path) {
    for line in format_export(kind, export, path) {
        println!("{}", line);
    }
}

/// Describe a written preview.
pub fn format_preview(source: (u32, u32), preview: (u32, u32), path: &Path) -> Vec<String> {
    let mut lines = vec![format!("Preview → {}", path.display())];
    if source == preview {
        lines.push(format!("{}Size: {}x{} (unchanged)", indent(1), source.0, source.1));
    } else {
        lines.push(format!(
            "{}Size: {}x{} → {}x{}",
            indent(1),
            source.0,
            source.1,
            preview.0,
            preview.1
        ));
    }
    lines
}

pub fn print_preview(source: (u32, u32), preview: (u32, u32), path: &Path) {
    for line in format_preview(source, preview, path) {
        println!("{}", line);
    }
}

/// List tools in menu order, numbered from 1.
pub fn format_menu(menu: &[OperationKind]) -> Vec<String> {
    menu.iter()
        .enumerate()
        .map(|(i, kind)| format!("{} {:<10} {}", i + 1, kind.key(), kind.label()))
        .collect()
}

pub fn print_menu(menu: &[OperationKind]) {
    for line in format_menu(menu) {
        println!("{}", line);
    }
}
