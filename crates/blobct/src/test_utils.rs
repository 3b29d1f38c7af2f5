use crate::{Array, BlobWriter, Composite, Config, Endian, Pointer, Result};

/// Default config with little-endian byte order.
pub fn le() -> Config {
    Config::new().endian(Endian::Little)
}

/// Space-separated lowercase hex.
pub fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Each relocation source with the delta stored at it.
pub fn deltas(blob: &crate::Blob) -> Vec<(u32, i64)> {
    blob.relocations()
        .iter()
        .map(|&source| (source, blob.read_delta(source).unwrap()))
        .collect()
}

/// Root record with two pointer fields.
pub struct PairOfPointers {
    pub a: Pointer<u32>,
    pub b: Pointer<u32>,
}

impl Composite for PairOfPointers {
    type Elem = Self;

    fn align(&self, w: &mut BlobWriter<'_>) -> Result<()> {
        w.align(w.config().pointer_align)
    }

    fn write(&self, w: &mut BlobWriter<'_>) -> Result<()> {
        w.write(&self.a)?;
        w.write(&self.b)
    }
}

/// Root record: values behind a pointer, then a name.
pub struct Labeled {
    pub values: Pointer<u32>,
    pub name: String,
}

impl Composite for Labeled {
    type Elem = Self;

    fn align(&self, w: &mut BlobWriter<'_>) -> Result<()> {
        w.align(w.config().pointer_align)
    }

    fn write(&self, w: &mut BlobWriter<'_>) -> Result<()> {
        w.write(&self.values)?;
        w.write(&self.name)
    }
}

/// Linked list node; pointers may close a cycle.
pub struct Node {
    pub value: u32,
    pub next: Pointer<Node>,
}

impl Composite for Node {
    type Elem = Self;

    fn align(&self, w: &mut BlobWriter<'_>) -> Result<()> {
        w.align(w.config().int_align)
    }

    fn write(&self, w: &mut BlobWriter<'_>) -> Result<()> {
        w.write(&self.value)?;
        w.write(&self.next)
    }
}

pub fn array<T>(items: impl IntoIterator<Item = T>) -> Array<T> {
    items.into_iter().collect()
}
