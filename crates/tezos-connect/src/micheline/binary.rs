//! Micheline binary codec

use super::{Entrypoint, Error, Expr, Parameters};
use crate::encoding::{write_big_int, write_dynamic, write_short_dynamic};

const TAG_INT: u8 = 0x00;
const TAG_STRING: u8 = 0x01;
const TAG_SEQ: u8 = 0x02;
const TAG_PRIM_0: u8 = 0x03;
const TAG_PRIM_0_ANNOTS: u8 = 0x04;
const TAG_PRIM_1: u8 = 0x05;
const TAG_PRIM_1_ANNOTS: u8 = 0x06;
const TAG_PRIM_2: u8 = 0x07;
const TAG_PRIM_2_ANNOTS: u8 = 0x08;
const TAG_PRIM_N: u8 = 0x09;
const TAG_BYTES: u8 = 0x0a;

impl Expr {
    /// Append the binary form
    pub fn write(&self, out: &mut Vec<u8>) -> Result<(), Error> {
        match self {
            Expr::Int(int) => {
                out.push(TAG_INT);
                write_big_int(out, int);
            }
            Expr::String(s) => {
                out.push(TAG_STRING);
                write_dynamic(out, s.as_bytes())?;
            }
            Expr::Bytes(bytes) => {
                out.push(TAG_BYTES);
                write_dynamic(out, bytes)?;
            }
            Expr::Seq(items) => {
                let mut inner = Vec::new();
                for item in items {
                    item.write(&mut inner)?;
                }
                out.push(TAG_SEQ);
                write_dynamic(out, &inner)?;
            }
            Expr::Prim { op, args, annots } => {
                let has_annots = !annots.is_empty();
                let tag = match (args.len(), has_annots) {
                    (0, false) => TAG_PRIM_0,
                    (0, true) => TAG_PRIM_0_ANNOTS,
                    (1, false) => TAG_PRIM_1,
                    (1, true) => TAG_PRIM_1_ANNOTS,
                    (2, false) => TAG_PRIM_2,
                    (2, true) => TAG_PRIM_2_ANNOTS,
                    _ => TAG_PRIM_N,
                };
                out.push(tag);
                out.push(op.code());

                if tag == TAG_PRIM_N {
                    let mut inner = Vec::new();
                    for arg in args {
                        arg.write(&mut inner)?;
                    }
                    write_dynamic(out, &inner)?;
                    write_dynamic(out, annots.join(" ").as_bytes())?;
                } else {
                    for arg in args {
                        arg.write(out)?;
                    }
                    if has_annots {
                        write_dynamic(out, annots.join(" ").as_bytes())?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Binary form
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut out = Vec::new();
        self.write(&mut out)?;
        Ok(out)
    }
}

impl Entrypoint {
    /// Append the binary form
    pub fn write(&self, out: &mut Vec<u8>) -> Result<(), Error> {
        match self.tag() {
            Some(tag) => out.push(tag),
            None => {
                out.push(0xff);
                write_short_dynamic(out, self.name().as_bytes())?;
            }
        }
        Ok(())
    }
}

impl Parameters {
    /// Append the optional transaction parameters field
    pub fn write(&self, out: &mut Vec<u8>) -> Result<(), Error> {
        match &self.value {
            None => out.push(0x00),
            Some(value) => {
                out.push(0xff);
                self.entrypoint.write(out)?;
                write_dynamic(out, &value.to_bytes()?)?;
            }
        }
        Ok(())
    }
}
