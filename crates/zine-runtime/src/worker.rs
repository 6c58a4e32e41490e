use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use zine_core::catalog::find_entry;
use zine_core::{
    PrintOptions, Storage, Surface, Track, ZineError, ZineSession, ZineStore,
    calculate_statistics, compose_print_sheet_with,
};

use crate::images::{ImageError, load_image_data_uri};
use crate::lookup::TrackLookup;
use crate::{ZineCommand, ZineUpdate};

/// Background work finishing, fed back into the worker loop.
///
/// Each result carries the session generation it was requested under.
enum Completion {
    Tracks {
        generation: u64,
        page: u8,
        query: String,
        result: zine_core::Result<Vec<Track>>,
    },
    Image {
        generation: u64,
        surface: Surface,
        sequence: u64,
        result: Result<String, ImageError>,
    },
}

/// Async worker task that owns the editing session and sends updates
pub async fn worker_task<S, L>(
    storage: S,
    lookup: L,
    mut command_rx: mpsc::UnboundedReceiver<ZineCommand>,
    update_tx: mpsc::UnboundedSender<ZineUpdate>,
) where
    S: Storage + Send + 'static,
    L: TrackLookup,
{
    let store = match tokio::task::spawn_blocking(move || ZineStore::open(storage)).await {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to open saved zines: {}", e);
            return;
        }
    };

    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel();
    let mut worker = Worker {
        session: ZineSession::new(),
        store: Arc::new(Mutex::new(store)),
        lookup: Arc::new(lookup),
        active_page: None,
        image_sequence: HashMap::new(),
        completion_tx,
        update_tx,
    };

    loop {
        tokio::select! {
            cmd = command_rx.recv() => match cmd {
                Some(ZineCommand::GeneratePreview { options }) => {
                    worker.generate_preview(options, &mut command_rx).await;
                }
                Some(cmd) => worker.process_command(cmd).await,
                None => break,
            },
            Some(done) = completion_rx.recv() => worker.complete(done),
        }
    }

    log::debug!("Command channel closed, worker exiting");
}

struct Worker<S: Storage, L> {
    session: ZineSession,
    /// Written only from the blocking pool
    store: Arc<Mutex<ZineStore<S>>>,
    lookup: Arc<L>,
    /// Page whose editor is open
    active_page: Option<u8>,
    /// Latest image request per surface
    image_sequence: HashMap<Surface, u64>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    update_tx: mpsc::UnboundedSender<ZineUpdate>,
}

impl<S, L> Worker<S, L>
where
    S: Storage + Send + 'static,
    L: TrackLookup,
{
    fn store(&self) -> MutexGuard<'_, ZineStore<S>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a store operation on the blocking pool
    async fn with_store<T, F>(&mut self, op: F) -> Option<T>
    where
        F: FnOnce(&mut ZineStore<S>) -> T + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let task = tokio::task::spawn_blocking(move || {
            let mut store = store.lock().unwrap_or_else(PoisonError::into_inner);
            op(&mut store)
        });
        match task.await {
            Ok(value) => Some(value),
            Err(e) => {
                self.error(format!("Storage task failed: {}", e));
                None
            }
        }
    }

    /// Save the session, starting over on a blank zine when `finish` is set
    async fn save_session(&mut self, finish: bool) -> Option<String> {
        let mut session = self.session.clone();
        let (session, id) = self
            .with_store(move |store| {
                let id = if finish {
                    session.finish(store)
                } else {
                    session.save_to(store)
                };
                (session, id)
            })
            .await?;
        self.session = session;
        Some(id)
    }

    fn send(&self, update: ZineUpdate) {
        let _ = self.update_tx.send(update);
    }

    fn error(&self, message: String) {
        let _ = self.update_tx.send(ZineUpdate::Error { message });
    }

    /// Report the current state of a surface after it changed
    fn surface_changed(&self, surface: Surface) {
        match surface {
            Surface::Page(page) => self.page_changed(page),
            Surface::FrontCover | Surface::BackCover => self.send(ZineUpdate::CoverChanged {
                cover: self.session.cover().clone(),
            }),
        }
    }

    fn page_changed(&self, page: u8) {
        if let Some(data) = self.session.page(page) {
            self.send(ZineUpdate::PageChanged {
                page,
                data: data.clone(),
            });
        }
    }

    fn session_replaced(&self) {
        self.send(ZineUpdate::SessionReplaced {
            zine_id: self.session.zine_id().map(str::to_string),
            cover: self.session.cover().clone(),
        });
        for page in self.session.pages().keys() {
            self.page_changed(*page);
        }
    }

    async fn process_command(&mut self, cmd: ZineCommand) {
        match cmd {
            ZineCommand::UpdatePage { page, patch } => {
                if self.session.update_page(page, patch) {
                    self.page_changed(page);
                } else {
                    self.error(ZineError::InvalidPage(page).to_string());
                }
            }
            ZineCommand::UpdateCover { patch } => {
                self.session.update_cover(patch);
                self.surface_changed(Surface::FrontCover);
            }
            ZineCommand::SetActivePage { page } => {
                self.active_page = page;
            }
            ZineCommand::AddDecoration {
                surface,
                element_id,
            } => {
                let Some(entry) = find_entry(&element_id) else {
                    self.error(format!("Unknown decoration: {}", element_id));
                    return;
                };
                if self.session.add_decoration(surface, entry).is_some() {
                    self.surface_changed(surface);
                }
            }
            ZineCommand::RemoveDecoration { surface, id } => {
                if self.session.remove_decoration(surface, &id).is_some() {
                    self.surface_changed(surface);
                }
            }
            ZineCommand::PointerDown { surface, id, mode } => {
                if !self.session.pointer_down(surface, &id, mode) {
                    log::debug!("Pointer down on {} ignored", id);
                }
            }
            ZineCommand::PointerMove { x, y } => {
                let Some(surface) = self.session.capture().active().map(|g| g.surface) else {
                    return;
                };
                if self.session.pointer_move(x, y) {
                    self.surface_changed(surface);
                }
            }
            ZineCommand::PointerUp => self.session.pointer_up(),
            ZineCommand::SearchTracks { page, query } => {
                self.active_page = Some(page);
                self.search_tracks(page, query);
            }
            ZineCommand::SelectTrack { page, track } => {
                if self.session.select_track(page, track) {
                    self.page_changed(page);
                } else {
                    self.error(ZineError::InvalidPage(page).to_string());
                }
            }
            ZineCommand::LoadImage { surface, path } => {
                let sequence = self.image_sequence.entry(surface).or_insert(0);
                *sequence += 1;
                let sequence = *sequence;
                let generation = self.session.generation();
                let completion_tx = self.completion_tx.clone();
                tokio::spawn(async move {
                    let result = load_image_data_uri(&path).await;
                    let _ = completion_tx.send(Completion::Image {
                        generation,
                        surface,
                        sequence,
                        result,
                    });
                });
            }
            ZineCommand::NewZine => {
                self.session.reset_all();
                self.session_replaced();
            }
            ZineCommand::SaveZine => {
                if let Some(id) = self.save_session(false).await {
                    self.send(ZineUpdate::Saved { id });
                }
            }
            ZineCommand::FinishZine => {
                if let Some(id) = self.save_session(true).await {
                    self.send(ZineUpdate::Saved { id });
                    self.session_replaced();
                }
            }
            ZineCommand::LoadZine { id } => {
                let zine = self.store().find(&id).cloned();
                match zine {
                    Some(zine) => {
                        self.session.load_zine(&zine);
                        self.session_replaced();
                    }
                    None => self.error(ZineError::UnknownZine(id).to_string()),
                }
            }
            ZineCommand::DeleteZine { id } => {
                let target = id.clone();
                match self.with_store(move |store| store.delete(&target)).await {
                    Some(true) => self.send(ZineUpdate::Deleted { id }),
                    Some(false) => self.error(ZineError::UnknownZine(id).to_string()),
                    None => {}
                }
            }
            ZineCommand::ListZines => {
                let zines = self.store().list_all().to_vec();
                self.send(ZineUpdate::ZineList { zines });
            }
            ZineCommand::GetPage { page } => {
                if self.session.page(page).is_some() {
                    self.page_changed(page);
                } else {
                    self.error(ZineError::InvalidPage(page).to_string());
                }
            }
            ZineCommand::GeneratePreview { options } => self.compose_preview(&options),
            ZineCommand::CalculateStats => self.send(ZineUpdate::StatsCalculated {
                stats: calculate_statistics(self.session.cover(), self.session.pages()),
            }),
            ZineCommand::LoadPrintOptions { path } => match PrintOptions::load(&path).await {
                Ok(options) => self.send(ZineUpdate::PrintOptionsLoaded { options }),
                Err(e) => self.error(format!("Failed to load print options: {}", e)),
            },
        }
    }

    fn search_tracks(&self, page: u8, query: String) {
        let generation = self.session.generation();
        let lookup = Arc::clone(&self.lookup);
        let completion_tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = lookup.search(&query).await;
            let _ = completion_tx.send(Completion::Tracks {
                generation,
                page,
                query,
                result,
            });
        });
    }

    /// Compose a preview, first draining queued commands so only the most
    /// recent preview request is served
    async fn generate_preview(
        &mut self,
        mut options: PrintOptions,
        command_rx: &mut mpsc::UnboundedReceiver<ZineCommand>,
    ) {
        let mut deferred = Vec::new();
        while let Ok(next_cmd) = command_rx.try_recv() {
            if let ZineCommand::GeneratePreview {
                options: new_options,
            } = next_cmd
            {
                log::debug!("Discarding queued preview generation, using newer request");
                options = new_options;
            } else {
                deferred.push(next_cmd);
            }
        }

        // Queued commands run first so the preview reflects them
        for cmd in deferred {
            self.process_command(cmd).await;
        }

        self.compose_preview(&options);
    }

    fn compose_preview(&self, options: &PrintOptions) {
        match compose_print_sheet_with(self.session.cover(), self.session.pages(), options) {
            Ok(sheet) => self.send(ZineUpdate::PreviewGenerated {
                sheet: Box::new(sheet),
            }),
            Err(e) => self.error(format!("Failed to generate preview: {}", e)),
        }
    }

    fn complete(&mut self, done: Completion) {
        match done {
            Completion::Tracks {
                generation,
                page,
                query,
                result,
            } => {
                if generation != self.session.generation() {
                    log::debug!("Dropping track results from a previous zine");
                    return;
                }
                if self.active_page != Some(page) {
                    log::debug!("Dropping track results for inactive page {}", page);
                    return;
                }
                let tracks = result.unwrap_or_else(|e| {
                    log::warn!("Track search failed: {}", e);
                    Vec::new()
                });
                self.send(ZineUpdate::TrackResults {
                    page,
                    query,
                    tracks,
                });
            }
            Completion::Image {
                generation,
                surface,
                sequence,
                result,
            } => {
                if generation != self.session.generation() {
                    log::debug!("Dropping image from a previous zine");
                    return;
                }
                if self.image_sequence.get(&surface) != Some(&sequence) {
                    log::debug!("Dropping superseded image for {}", surface.label());
                    return;
                }
                match result {
                    Ok(uri) => {
                        if self.session.set_background(surface, zine_core::Fill::Image(uri)) {
                            self.surface_changed(surface);
                        }
                    }
                    Err(e) => self.error(format!("Failed to load image: {}", e)),
                }
            }
        }
    }
}
