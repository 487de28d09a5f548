//! Nested-text (ASC) writer.
//!
//! Layout of one neurite, two spaces per nesting level:
//!
//! ```text
//! ((Axon)
//!   (    0.00     0.00     0.00     1.00)
//!   (    1.00     0.00     0.00     1.00)
//!   (
//!     (    1.00     0.00     0.00     1.00)
//!     (    2.00     1.00     0.00     0.50)
//!     |
//!     (    1.00     0.00     0.00     1.00)
//!     (    2.00    -1.00     0.00     0.50)
//!   )
//! )
//! ```
//!
//! Branch nesting is walked with an explicit event stack, so a long
//! unbranched chain of sections cannot overflow the call stack.

use std::io::Write;

use crate::core::{Point3D, PointType};
use crate::error::{MorphError, Result};
use crate::morphology::{Morphology, SectionId};

const FORMAT: &str = "ASC";

const HEADER: &str = "; Generated by shakha";

const INDENT: &str = "  ";

/// Block tag of a neurite root type.
fn neurite_tag(section_type: PointType) -> Result<&'static str> {
    match section_type {
        PointType::Axon => Ok("Axon"),
        PointType::BasalDendrite => Ok("Dendrite"),
        PointType::ApicalDendrite => Ok("Apical"),
        PointType::Soma | PointType::Undefined => Err(MorphError::UnknownSectionType {
            section_type,
            format: FORMAT,
        }),
    }
}

/// Pending output while walking one neurite.
#[derive(Debug, Clone, Copy)]
enum Event {
    /// Write a section's points, then open its children
    Section { id: SectionId, depth: usize },
    /// Sibling marker
    Separator { depth: usize },
    /// Close a children block
    Close { depth: usize },
}

/// Append one indented line. Empty lines carry no indentation.
fn push_line(out: &mut String, depth: usize, line: &str) {
    if !line.is_empty() {
        for _ in 0..depth {
            out.push_str(INDENT);
        }
    }
    out.push_str(line);
    out.push('\n');
}

fn push_point(out: &mut String, depth: usize, p: &Point3D) {
    let line = format!("({:8.2} {:8.2} {:8.2} {:8.2})", p.x, p.y, p.z, p.radius);
    push_line(out, depth, &line);
}

fn push_soma(out: &mut String, morphology: &Morphology) {
    push_line(out, 0, "(\"CellBody\"");
    push_line(out, 1, "(CellBody)");
    for p in morphology.soma().points() {
        push_point(out, 1, p);
    }
    push_line(out, 0, ")");
    push_line(out, 0, "");
}

/// Append the block of the neurite rooted at `root`.
fn push_neurite(out: &mut String, morphology: &Morphology, root: SectionId) -> Result<()> {
    let root_section = morphology.section(root);
    let tag = neurite_tag(root_section.section_type)?;

    push_line(out, 0, &format!("(({tag})"));

    let mut stack = vec![Event::Section { id: root, depth: 1 }];
    while let Some(event) = stack.pop() {
        match event {
            Event::Section { id, depth } => {
                let section = morphology.section(id);
                if section.section_type != root_section.section_type {
                    // Mixed types inside one neurite still need a valid tag
                    neurite_tag(section.section_type)?;
                }
                for p in &section.points {
                    push_point(out, depth, p);
                }
                if section.children.is_empty() {
                    continue;
                }

                push_line(out, depth, "(");
                stack.push(Event::Close { depth });
                for (k, &child) in section.children.iter().enumerate().rev() {
                    stack.push(Event::Section {
                        id: child,
                        depth: depth + 1,
                    });
                    if k > 0 {
                        stack.push(Event::Separator { depth: depth + 1 });
                    }
                }
            }
            Event::Separator { depth } => push_line(out, depth, "|"),
            Event::Close { depth } => push_line(out, depth, ")"),
        }
    }

    push_line(out, 0, ")");
    push_line(out, 0, "");
    push_line(out, 0, "");
    Ok(())
}

/// Render a morphology as ASC text.
///
/// # Errors
/// `UnknownSectionType` if a neurite contains a `Soma` or `Undefined` section.
pub fn to_asc_string(morphology: &Morphology) -> Result<String> {
    let mut out = String::new();
    push_line(&mut out, 0, HEADER);
    push_soma(&mut out, morphology);

    for &root in morphology.roots() {
        push_neurite(&mut out, morphology, root)?;
    }

    log::debug!(
        "Rendered {} neurites as ASC ({} bytes)",
        morphology.roots().len(),
        out.len()
    );
    Ok(out)
}

/// Write a morphology as ASC text.
///
/// The whole document is rendered in memory first, so a failing morphology
/// leaves `writer` untouched.
pub fn write_asc<W: Write>(morphology: &Morphology, writer: &mut W) -> Result<()> {
    let text = to_asc_string(morphology)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}
