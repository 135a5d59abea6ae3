//! Synthetic channel file builders shared by the integration tests.

#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};

/// Little-endian writer for channel file primitives.
pub struct ChannelWriter {
    buf: Vec<u8>,
}

impl ChannelWriter {
    /// Start a file with the `CF` magic already written.
    pub fn new() -> Self {
        ChannelWriter {
            buf: b"CF".to_vec(),
        }
    }

    pub fn bool(&mut self, v: bool) -> &mut Self {
        self.buf.push(v as u8);
        self
    }

    pub fn byte(&mut self, v: u8) -> &mut Self {
        self.buf.push(v);
        self
    }

    pub fn long(&mut self, v: u32) -> &mut Self {
        self.buf.write_u32::<LittleEndian>(v).unwrap();
        self
    }

    pub fn float(&mut self, v: f32) -> &mut Self {
        self.buf.write_f32::<LittleEndian>(v).unwrap();
        self
    }

    pub fn string(&mut self, s: &str) -> &mut Self {
        self.long(s.len() as u32);
        self.buf.extend_from_slice(s.as_bytes());
        self
    }

    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn ids(&mut self, ids: &[u32]) -> &mut Self {
        self.long(ids.len() as u32);
        for &id in ids {
            self.long(id);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn finish(&self) -> Vec<u8> {
        self.buf.clone()
    }
}

/// How the `DFP` block of an extended indication is written.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum DfpLayout {
    /// `DFP` tag followed by one wall thickness measurement.
    Tagged,
    /// Three filler bytes where the tag should be, and no block.
    Filler,
    /// Nothing at all; the next section follows immediately.
    Missing,
}

/// Header for channel B12, inlet end.
pub fn header(w: &mut ChannelWriter) {
    w.byte(2) // generating station
        .byte(3) // unit
        .byte(24)
        .byte(5)
        .byte(17)
        .byte(12) // abscissa
        .byte(2) // ordinate
        .byte(1) // end
        .byte(0) // face
        .string("HEAD-7")
        .string("J. Smith")
        .string("2024-05-17")
        .string("13:45:00");
}

pub fn calibrations(w: &mut ChannelWriter) {
    w.long(1);
    w.long(1).long(1_000).string("HEAD-7");
    w.long(2);
    for i in 0..2u8 {
        w.long(i as u32).string(&format!("cal{}.dat", i));
        for _ in 0..4 {
            w.raw(&[i; 14]);
        }
        w.string("notch");
    }
    w.string("pv.cal");
}

fn location(w: &mut ChannelWriter, value: f32) {
    w.bool(true).float(value).bool(false).float(0.0);
}

/// Inlet joint present, outlet absent.
pub fn rolled_joints(w: &mut ChannelWriter) {
    w.bool(true);
    location(w, 10.0); // axial start
    location(w, 60.0); // axial end
    location(w, 35.5); // burnish mark
    for roll in 0..3 {
        location(w, 20.0 + roll as f32 * 10.0);
    }
    location(w, 5.0); // end of pressure tube
    location(w, 62.0); // taper
    w.long(1);
    w.bool(false);
}

pub fn element(w: &mut ChannelWriter, id: u32, description: &str) {
    w.long(id)
        .float(0.0)
        .float(25.0)
        .float(0.0)
        .float(360.0)
        .long(3)
        .string(description)
        .long(1)
        .bool(true)
        .long(0)
        .string("")
        .bool(true)
        .bool(false);
}

/// One element in each element list: rescan 10, B-scan 20, reportable 30.
pub fn elements(w: &mut ChannelWriter) {
    w.long(1);
    element(w, 10, "rescan");
    w.long(2).bool(true);
    w.long(1);
    element(w, 20, "bscan");
    w.bool(true);
    w.long(1);
    element(w, 30, "reportable");
}

pub fn indication(w: &mut ChannelWriter, id: u32, reportable: &[u32], bscan: &[u32]) {
    w.long(id);
    for v in [100.0, 45.0, 2.0, 8.0, 0.0, 52.0, 75.0, 1.2, 3.4, 100.5, 90.0, 4.1, 3.4] {
        w.float(v);
    }
    w.string("default").string("default").string("ok");
    w.long(1).long(2);
    w.ids(reportable).ids(bscan);
}

pub fn extended(w: &mut ChannelWriter, dfp: DfpLayout) {
    w.raw(b"EI");
    for _ in 0..5 {
        w.float(50.0);
    }
    for _ in 0..8 {
        w.byte(80);
    }
    for _ in 0..10 {
        w.float(1.0);
    }
    for _ in 0..7 {
        w.bool(true);
    }
    w.long(2).float(100.0).float(45.0).float(0.8).float(101.0).float(46.0).float(1.1);
    w.long(0);
    w.long(0);
    w.string("N1").long(7).bool(false).bool(true);
    match dfp {
        DfpLayout::Tagged => {
            w.raw(b"DFP").long(1);
            w.float(100.0).float(45.0).float(3.3).float(1.5).string("water");
        }
        DfpLayout::Filler => {
            w.raw(b"XYZ");
        }
        DfpLayout::Missing => {}
    }
}

pub fn records(w: &mut ChannelWriter) {
    w.long(1);
    w.long(40).float(0.0).float(25.0).long(0).bool(true).long(1).ids(&[10]);
    w.long(1);
    w.long(50)
        .float(0.0)
        .float(25.0)
        .float(0.0)
        .float(360.0)
        .bool(true)
        .bool(false)
        .long(1)
        .ids(&[20]);
    w.long(1);
    w.string("scan001.dat").ids(&[40]).ids(&[50]).ids(&[30]);
}

/// A file with every section empty and both rolled joints absent.
pub fn minimal_file() -> Vec<u8> {
    let mut w = ChannelWriter::new();
    header(&mut w);
    w.long(0); // calibrations
    w.bool(false).bool(false);
    for _ in 0..7 {
        w.long(0);
    }
    w.finish()
}

/// A file exercising every section: two indications, the first with an
/// extended block laid out per `dfp`, the second plain.
pub fn full_file(dfp: DfpLayout) -> Vec<u8> {
    let mut w = ChannelWriter::new();
    header(&mut w);
    calibrations(&mut w);
    rolled_joints(&mut w);
    elements(&mut w);
    w.long(2);
    indication(&mut w, 1, &[30], &[20]);
    extended(&mut w, dfp);
    indication(&mut w, 2, &[], &[20]);
    records(&mut w);
    w.finish()
}
