//! Handle to a running PowerPoint application instance.

use crate::com::{self, ComObject, ComSession};
use deck2pdf_core::Result;
use std::path::Path;

/// `ppSaveAsPDF` in the PowerPoint `PpSaveAsFileType` enumeration.
const PP_SAVE_AS_PDF: i32 = 32;

/// `msoTrue` in the Office `MsoTriState` enumeration.
const MSO_TRUE: i32 = -1;

/// A running PowerPoint application instance.
///
/// Launching starts a fresh instance; dropping the handle asks it to quit,
/// on every exit path.
pub struct PowerPoint {
    // The application must be released while the COM runtime is still
    // initialized, so it is declared before the session guard.
    app: ComObject,
    _session: ComSession,
}

impl PowerPoint {
    /// Start a PowerPoint instance for batch conversion.
    pub fn launch() -> Result<Self> {
        let session = ComSession::initialize()?;
        let app = ComObject::create("PowerPoint.Application")?;

        // PowerPoint refuses to run with a hidden main window.
        if let Err(e) = app.put("Visible", com::variant_i32(MSO_TRUE)) {
            quit(&app);
            return Err(e);
        }

        Ok(Self {
            app,
            _session: session,
        })
    }

    /// Convert a single presentation to a PDF at `output`.
    ///
    /// Opens the deck, saves it in PDF format and closes it again. The deck
    /// is closed even when saving fails.
    pub fn convert_to_pdf(&self, input: &Path, output: &Path) -> Result<()> {
        let presentations = self.app.get_object("Presentations")?;
        let deck = Presentation::open(&presentations, input)?;
        deck.save_as_pdf(output)?;
        deck.close()
    }
}

impl Drop for PowerPoint {
    fn drop(&mut self) {
        quit(&self.app);
    }
}

fn quit(app: &ComObject) {
    if let Err(e) = app.call("Quit", Vec::new()) {
        log::warn!("PowerPoint did not quit cleanly: {}", e);
    }
}

/// An open presentation inside the running instance.
struct Presentation {
    deck: ComObject,
    closed: bool,
}

impl Presentation {
    /// Open the presentation at `path`.
    fn open(presentations: &ComObject, path: &Path) -> Result<Self> {
        let deck = presentations.call_object("Open", vec![com::variant_path(path)?])?;
        Ok(Self {
            deck,
            closed: false,
        })
    }

    /// Save the open deck as PDF.
    fn save_as_pdf(&self, path: &Path) -> Result<()> {
        self.deck.call(
            "SaveAs",
            vec![com::variant_path(path)?, com::variant_i32(PP_SAVE_AS_PDF)],
        )
    }

    /// Close the deck, surfacing any error.
    fn close(mut self) -> Result<()> {
        self.closed = true;
        self.deck.call("Close", Vec::new())
    }
}

impl Drop for Presentation {
    fn drop(&mut self) {
        if !self.closed {
            if let Err(e) = self.deck.call("Close", Vec::new()) {
                log::warn!("Presentation did not close cleanly: {}", e);
            }
        }
    }
}
