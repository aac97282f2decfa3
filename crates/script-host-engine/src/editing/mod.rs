/*!
 * # Editing Core Module
 *
 * Per-script text state and the edit algebra the host exposes to the
 * language service.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Source of Truth: xi-rope Buffer
 * - Each script's text lives in one **`xi_rope::Rope`**
 * - Sub-range edits are compiled to a rope **Delta** and applied in one step
 * - All offsets are UTF-8 byte offsets; an offset inside a character is rejected
 *
 * ### 2. Versions and History
 * - Every change bumps the script's **version** (starting at 1)
 * - Sub-range edits append an **EditRecord** to a bounded history window
 * - A full content replacement clears the window: no range describes it
 * - Any two versions inside the window collapse into one **TextChangeRange**
 *
 * ### 3. Line Index
 * - Line starts are recomputed on every change
 * - Lines and columns handed to the language service are 1-based
 *
 * ### 4. Edit Batches
 * - A rename or refactor yields many **TextEdits** against the same base text
 * - `normalize_edits` sorts them and drops edits nested inside another edit
 * - Partial overlaps are rejected rather than guessed at
 * - `apply_edits` splices from the highest offset down
 *
 * ## Module Structure
 *
 * - **`document`**: `Document`, one tracked script
 * - **`history`**: `EditRecord`, `EditHistory` and delta composition
 * - **`lines`**: `LineIndex` and line/column conversion
 * - **`edits`**: `TextEdit` normalization, application and inversion
 * - **`snapshot`**: `ScriptSnapshot`, an immutable view of one version
 * - **`span`**: `Span`, a half-open byte range
 */

pub mod document;
pub mod edits;
pub mod history;
pub mod lines;
pub mod snapshot;
pub mod span;

pub use document::Document;
pub use edits::{TextEdit, apply_edits, invert_edits, normalize_edits};
pub use history::{EditHistory, EditRecord, TextChangeRange, VersionDelta, collapse};
pub use lines::{LineCol, LineIndex};
pub use snapshot::ScriptSnapshot;
pub use span::Span;
