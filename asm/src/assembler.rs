use std::io::Write;

use color_print::cprintln;

use crate::{
    error::{Error, SourceError},
    label::Labels,
    parser::Stmt,
};

/// Pass 1: scan every line, record label definitions against the
/// index of the next instruction. Operands are not parsed here, only
/// line shape, so the only errors are malformed instruction lines.
pub fn collect_labels(src: &str) -> Result<Labels, SourceError> {
    let mut labels = Labels::new();
    let mut index: u32 = 0;
    for (no, raw) in src.lines().enumerate() {
        match Stmt::classify(raw).map_err(|e| SourceError::new(no, raw, e))? {
            Stmt::Label(name) => {
                if let Some(prev) = labels.insert(name.clone(), index) {
                    cprintln!(
                        "<yellow,bold>warn</>: label `{}` redefined (was {:#06X}, now {:#06X})",
                        name,
                        prev,
                        index
                    );
                }
            }
            Stmt::Code(_) => index += 1,
            _ => {}
        }
    }
    Ok(labels)
}

/// Pass 2: encode each instruction line against a frozen label table
/// and write it out little-endian. Stops at the first error; bytes
/// already written stay written.
pub fn assemble_with<W: Write>(src: &str, labels: &Labels, out: &mut W) -> Result<(), SourceError> {
    let mut index: u32 = 0;
    for (no, raw) in src.lines().enumerate() {
        let stmt = Stmt::classify(raw).map_err(|e| SourceError::new(no, raw, e))?;
        if let Stmt::Code(code) = stmt {
            let inst = code
                .encode(index, labels)
                .map_err(|e| SourceError::new(no, raw, e))?;
            out.write_all(&inst.to_bin().to_le_bytes())
                .map_err(|e| SourceError::new(no, raw, Error::Output(e)))?;
            index += 1;
        }
    }
    Ok(())
}

/// Both passes back to back.
pub fn assemble<W: Write>(src: &str, out: &mut W) -> Result<(), SourceError> {
    let labels = collect_labels(src)?;
    assemble_with(src, &labels, out)
}

/// Assembles into a list of 32-bit words, mainly for tests and the
/// dump listing.
pub fn assemble_words(src: &str) -> Result<Vec<u32>, SourceError> {
    let mut buf: Vec<u8> = Vec::new();
    assemble(src, &mut buf)?;
    Ok(buf
        .chunks_exact(4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

/// Colored listing: labels, then each instruction with its index and
/// encoded bytes.
pub fn dump(src: &str, labels: &Labels) -> Result<(), SourceError> {
    let mut index: u32 = 0;
    for (no, raw) in src.lines().enumerate() {
        match Stmt::classify(raw).map_err(|e| SourceError::new(no, raw, e))? {
            Stmt::Label(name) => cprintln!("<green>{}:</>", name),
            Stmt::Code(code) => {
                let inst = code
                    .encode(index, labels)
                    .map_err(|e| SourceError::new(no, raw, e))?;
                let bin = inst.to_bin();
                cprintln!(
                    "<green>{:04X}</> | {:02X} {:02X} {:02X} {:02X} | {}",
                    index,
                    (bin >> 24) & 0xFF,
                    (bin >> 16) & 0xFF,
                    (bin >> 8) & 0xFF,
                    bin & 0xFF,
                    inst.cformat()
                );
                index += 1;
            }
            _ => {}
        }
    }
    Ok(())
}
