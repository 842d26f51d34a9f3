//! Capture pipeline: background removal, crop, compose, print sheet.
//!
//! Runs once per capture. The only suspension point is the external
//! background-removal provider; everything after it is synchronous and pure.
//!
//! A [`CaptureSession`] hands out generation tickets. Starting a new capture
//! or retaking invalidates every outstanding ticket, and a pipeline whose
//! ticket is stale when it resumes returns [`CaptureOutcome::Superseded`]
//! instead of a photo, so a slow provider can never overwrite newer state.

use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

use crate::compose::{compose_photo, ComposeError};
use crate::config::PhotoSpec;
use crate::crop::{compute_crop, CropRect};
use crate::decode::{RgbRaster, RgbaRaster};
use crate::encode::{encode_jpeg, EncodeError};
use crate::landmarks::LandmarkFrame;
use crate::sheet::tile_print_sheet;

/// Failure reported by an external provider. Terminal for the capture.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{provider} failed: {message}")]
pub struct ProviderError {
    pub provider: &'static str,
    pub message: String,
}

impl ProviderError {
    pub fn new(provider: &'static str, message: impl Into<String>) -> Self {
        Self {
            provider,
            message: message.into(),
        }
    }
}

/// Errors that end a capture attempt. None are retried automatically.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Background removal failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Composition failed: {0}")]
    Compose(#[from] ComposeError),

    #[error("Encoding failed: {0}")]
    Encode(#[from] EncodeError),
}

/// Replaces the background of a captured frame.
///
/// Implementations return an RGBA raster whose alpha masks out the
/// background. The output resolution may differ from the input.
#[allow(async_fn_in_trait)]
pub trait BackgroundRemover {
    async fn remove_background(&self, frame: &RgbaRaster) -> Result<RgbaRaster, ProviderError>;
}

/// Identifies one capture attempt within a [`CaptureSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureTicket(u64);

impl CaptureTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Generation counter guarding against stale capture results.
#[derive(Debug, Default)]
pub struct CaptureSession {
    generation: AtomicU64,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a capture, invalidating any capture still in flight.
    pub fn begin(&self) -> CaptureTicket {
        CaptureTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Discard the current capture (user pressed retake).
    pub fn retake(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, ticket: CaptureTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }
}

/// Products of a completed capture.
#[derive(Debug, Clone)]
pub struct CapturedPhoto {
    /// Crop planned on the background-removed raster.
    pub crop: CropRect,
    /// The composed digital photo.
    pub photo: RgbRaster,
    /// `photo` encoded as JPEG.
    pub photo_jpeg: Vec<u8>,
    /// Print sheet encoded as JPEG.
    pub sheet_jpeg: Vec<u8>,
}

#[derive(Debug, Clone)]
pub enum CaptureOutcome {
    Completed(CapturedPhoto),
    /// A newer capture or a retake invalidated this one; nothing was produced.
    Superseded,
}

/// Run the full pipeline for one captured frame.
pub async fn process_capture<R: BackgroundRemover>(
    session: &CaptureSession,
    ticket: CaptureTicket,
    remover: &R,
    frame: &RgbaRaster,
    landmarks: &LandmarkFrame,
    spec: &PhotoSpec,
) -> Result<CaptureOutcome, CaptureError> {
    log::debug!(target: "icaphoto::pipeline", "removing background for capture {}", ticket.0);
    let cutout = remover.remove_background(frame).await.inspect_err(|e| {
        log::error!(target: "icaphoto::pipeline", "capture {} failed: {e}", ticket.0);
    })?;
    finish_capture(session, ticket, &cutout, landmarks, spec)
}

/// Crop, compose, tile and encode a background-removed raster.
///
/// Used directly when background removal happens outside Rust. The ticket
/// is checked before any work starts and again once the outputs are ready.
pub fn finish_capture(
    session: &CaptureSession,
    ticket: CaptureTicket,
    cutout: &RgbaRaster,
    landmarks: &LandmarkFrame,
    spec: &PhotoSpec,
) -> Result<CaptureOutcome, CaptureError> {
    if !session.is_current(ticket) {
        log::info!(target: "icaphoto::pipeline", "capture {} superseded, discarding", ticket.0);
        return Ok(CaptureOutcome::Superseded);
    }
    let captured = render(cutout, landmarks, spec)?;
    Ok(settle(session, ticket, captured))
}

fn render(cutout: &RgbaRaster, landmarks: &LandmarkFrame, spec: &PhotoSpec) -> Result<CapturedPhoto, CaptureError> {
    let crop = compute_crop(landmarks, cutout.width, cutout.height, spec);
    let photo = compose_photo(cutout, &crop, spec)?;
    let photo_jpeg = encode_jpeg(&photo, spec.jpeg_quality)?;
    let sheet = tile_print_sheet(&photo, spec)?;
    let sheet_jpeg = encode_jpeg(&sheet, spec.jpeg_quality)?;
    Ok(CapturedPhoto {
        crop,
        photo,
        photo_jpeg,
        sheet_jpeg,
    })
}

/// Hand out `captured` only if `ticket` is still the current capture.
fn settle(session: &CaptureSession, ticket: CaptureTicket, captured: CapturedPhoto) -> CaptureOutcome {
    if !session.is_current(ticket) {
        log::info!(
            target: "icaphoto::pipeline",
            "capture {} superseded while rendering, discarding",
            ticket.0
        );
        return CaptureOutcome::Superseded;
    }
    log::info!(
        target: "icaphoto::pipeline",
        "capture {} ready: photo {} bytes, sheet {} bytes",
        ticket.0,
        captured.photo_jpeg.len(),
        captured.sheet_jpeg.len()
    );
    CaptureOutcome::Completed(captured)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::index;

    /// Returns the frame unchanged.
    struct PassThrough;

    impl BackgroundRemover for PassThrough {
        async fn remove_background(&self, frame: &RgbaRaster) -> Result<RgbaRaster, ProviderError> {
            Ok(frame.clone())
        }
    }

    struct Failing;

    impl BackgroundRemover for Failing {
        async fn remove_background(&self, _frame: &RgbaRaster) -> Result<RgbaRaster, ProviderError> {
            Err(ProviderError::new("background-removal", "model failed to load"))
        }
    }

    /// Simulates the user pressing retake while removal is pending.
    struct RetakeDuringRemoval<'a> {
        session: &'a CaptureSession,
    }

    impl BackgroundRemover for RetakeDuringRemoval<'_> {
        async fn remove_background(&self, frame: &RgbaRaster) -> Result<RgbaRaster, ProviderError> {
            self.session.retake();
            Ok(frame.clone())
        }
    }

    fn face() -> LandmarkFrame {
        LandmarkFrame::empty()
            .with(index::CHIN, 0.5, 0.8)
            .with(index::FOREHEAD, 0.5, 0.3)
            .with(index::NOSE_TIP, 0.5, 0.55)
            .with(index::LEFT_EYE_OUTER, 0.4, 0.45)
            .with(index::RIGHT_EYE_OUTER, 0.6, 0.45)
    }

    fn frame() -> RgbaRaster {
        RgbaRaster::filled(160, 120, [90, 120, 150, 255])
    }

    #[test]
    fn test_ticket_generations_increase() {
        let session = CaptureSession::new();
        let a = session.begin();
        let b = session.begin();
        assert!(b.generation() > a.generation());
        assert!(!session.is_current(a));
        assert!(session.is_current(b));
        session.retake();
        assert!(!session.is_current(b));
    }

    #[test]
    fn test_capture_completes() {
        let session = CaptureSession::new();
        let ticket = session.begin();
        let spec = PhotoSpec::default();
        let outcome =
            pollster::block_on(process_capture(&session, ticket, &PassThrough, &frame(), &face(), &spec))
                .unwrap();

        let CaptureOutcome::Completed(photo) = outcome else {
            panic!("expected a completed capture");
        };
        assert_eq!((photo.photo.width, photo.photo.height), (400, 514));
        assert_eq!(&photo.photo_jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(&photo.sheet_jpeg[0..2], &[0xFF, 0xD8]);
        assert!(photo.crop.fits_within(160.0, 120.0));

        let sheet = crate::decode::decode_image(&photo.sheet_jpeg).unwrap();
        assert_eq!((sheet.width, sheet.height), (1200, 1800));
    }

    #[test]
    fn test_provider_failure_is_terminal() {
        let session = CaptureSession::new();
        let ticket = session.begin();
        let result = pollster::block_on(process_capture(
            &session,
            ticket,
            &Failing,
            &frame(),
            &face(),
            &PhotoSpec::default(),
        ));
        match result {
            Err(CaptureError::Provider(e)) => {
                assert_eq!(e.to_string(), "background-removal failed: model failed to load");
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[test]
    fn test_retake_during_removal_discards_result() {
        let session = CaptureSession::new();
        let ticket = session.begin();
        let remover = RetakeDuringRemoval { session: &session };
        let outcome = pollster::block_on(process_capture(
            &session,
            ticket,
            &remover,
            &frame(),
            &face(),
            &PhotoSpec::default(),
        ))
        .unwrap();
        assert!(matches!(outcome, CaptureOutcome::Superseded));
    }

    #[test]
    fn test_newer_capture_supersedes_older() {
        let session = CaptureSession::new();
        let old = session.begin();
        let new = session.begin();
        let spec = PhotoSpec::default();

        let stale = finish_capture(&session, old, &frame(), &face(), &spec).unwrap();
        assert!(matches!(stale, CaptureOutcome::Superseded));

        let fresh = finish_capture(&session, new, &frame(), &face(), &spec).unwrap();
        assert!(matches!(fresh, CaptureOutcome::Completed(_)));
    }

    #[test]
    fn test_retake_while_rendering_discards_result() {
        let session = CaptureSession::new();
        let ticket = session.begin();
        let captured = render(&frame(), &face(), &PhotoSpec::default()).unwrap();
        session.retake();
        assert!(matches!(settle(&session, ticket, captured), CaptureOutcome::Superseded));
    }

    #[test]
    fn test_settle_keeps_current_result() {
        let session = CaptureSession::new();
        let ticket = session.begin();
        let captured = render(&frame(), &face(), &PhotoSpec::default()).unwrap();
        let CaptureOutcome::Completed(photo) = settle(&session, ticket, captured) else {
            panic!("expected a completed capture");
        };
        assert_eq!((photo.photo.width, photo.photo.height), (400, 514));
    }

    #[test]
    fn test_empty_cutout_is_compose_error() {
        let session = CaptureSession::new();
        let ticket = session.begin();
        let empty = RgbaRaster::filled(0, 0, [0; 4]);
        let result = finish_capture(&session, ticket, &empty, &face(), &PhotoSpec::default());
        assert!(matches!(
            result,
            Err(CaptureError::Compose(ComposeError::EmptySource))
        ));
    }

    #[test]
    fn test_missing_landmarks_still_produce_photo() {
        let session = CaptureSession::new();
        let ticket = session.begin();
        let spec = PhotoSpec::default();
        let outcome =
            finish_capture(&session, ticket, &frame(), &LandmarkFrame::empty(), &spec).unwrap();
        let CaptureOutcome::Completed(photo) = outcome else {
            panic!("expected a completed capture");
        };
        assert_eq!(photo.crop, crate::crop::center_crop(160, 120, &spec));
    }
}
