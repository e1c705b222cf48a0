/*!
 * Document tree modeling for template filling.
 *
 * - `model`: runs, paragraphs, tables, sections, and the document itself
 * - `container`: one ordered producer of every text container, regardless of zone
 */

pub mod model;
pub mod container;

// Re-export types used by other modules
pub use model::{
    Document, Paragraph, RgbColor, Run, RunStyle, Section, Table, TableCell, TableRow,
};
pub use container::{ContainerSource, Zone};
