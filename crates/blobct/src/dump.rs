//! Human-readable blob dump for debugging and tests.
//!
//! Sections:
//! - `[layout]`: one line per placed segment (`G<index>` or `S`)
//! - `[data]`: hex rows of 16 bytes; pointer fields and inter-segment padding
//!   are highlighted when colors are on
//! - `[strings]`: interned strings at their absolute offsets
//! - `[relocs]`: each pointer field, its target and the stored delta

use std::fmt::Write as _;

use blobct_core::Colors;

use crate::output::Blob;

const ROW: usize = 16;

#[derive(Clone, Copy, PartialEq, Eq)]
enum ByteKind {
    Plain,
    Pointer,
    Gap,
}

/// Render `blob` section by section.
pub fn dump(blob: &Blob, colors: Colors) -> String {
    let mut out = String::new();

    dump_layout(&mut out, blob, colors);
    out.push('\n');
    dump_data(&mut out, blob, colors);
    if blob.strings().next().is_some() {
        out.push('\n');
        dump_strings(&mut out, blob, colors);
    }
    out.push('\n');
    dump_relocs(&mut out, blob, colors);

    out
}

fn dump_layout(out: &mut String, blob: &Blob, c: Colors) {
    writeln!(out, "{}", c.paint(c.header, "[layout]")).unwrap();
    for p in blob.placements() {
        let name = format!("{:<3}", p.segment.to_string());
        write!(
            out,
            "{}{} len {}",
            c.paint(c.address, name),
            c.paint(c.address, format_args!("{:04x}", p.offset)),
            p.len
        )
        .unwrap();
        if p.align > 0 {
            write!(out, " align {}", p.align).unwrap();
        }
        out.push('\n');
    }
}

fn dump_data(out: &mut String, blob: &Blob, c: Colors) {
    writeln!(out, "{}", c.paint(c.header, "[data]")).unwrap();
    let kinds = classify(blob);

    for (row, chunk) in blob.data().chunks(ROW).enumerate() {
        let base = row * ROW;
        write!(out, "{} ", c.paint(c.address, format_args!("{base:04x}"))).unwrap();
        for (i, byte) in chunk.iter().enumerate() {
            out.push(' ');
            if i == ROW / 2 {
                out.push(' ');
            }
            let style = match kinds[base + i] {
                ByteKind::Plain => "",
                ByteKind::Pointer => c.pointer,
                ByteKind::Gap => c.padding,
            };
            out.push_str(&c.paint(style, format_args!("{byte:02x}")));
        }
        out.push('\n');
    }
}

fn dump_strings(out: &mut String, blob: &Blob, c: Colors) {
    writeln!(out, "{}", c.paint(c.header, "[strings]")).unwrap();
    for (offset, bytes) in blob.strings() {
        let text = String::from_utf8_lossy(bytes);
        writeln!(
            out,
            "{} {}",
            c.paint(c.address, format_args!("{offset:04x}")),
            c.paint(c.string, format_args!("{text:?}"))
        )
        .unwrap();
    }
}

fn dump_relocs(out: &mut String, blob: &Blob, c: Colors) {
    writeln!(out, "{}", c.paint(c.header, "[relocs]")).unwrap();
    for (i, &source) in blob.relocations().iter().enumerate() {
        let delta = blob.read_delta(source).unwrap_or_default();
        let target = source as i64 + delta;
        writeln!(
            out,
            "R{i} {} -> {} ({delta:+})",
            c.paint(c.address, format_args!("{source:04x}")),
            c.paint(c.pointer, format_args!("{target:04x}"))
        )
        .unwrap();
    }
}

/// Tag each data byte as part of a pointer field, an inter-segment gap, or neither.
fn classify(blob: &Blob) -> Vec<ByteKind> {
    let mut kinds = vec![ByteKind::Gap; blob.data().len()];
    for p in blob.placements() {
        kinds[p.offset as usize..p.end() as usize].fill(ByteKind::Plain);
    }

    let width = blob.pointer_size() as usize;
    for &source in blob.relocations() {
        let start = source as usize;
        let end = (start + width).min(kinds.len());
        kinds[start..end].fill(ByteKind::Pointer);
    }
    kinds
}
