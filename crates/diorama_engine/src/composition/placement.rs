//! # Placement Loader
//!
//! Fans a manifest out to one worker thread per entry. Each worker fetches
//! and decodes its model and applies the material policy; finished models
//! come back over a channel and are inserted into the scene by whoever owns
//! it, either incrementally with [`PendingPlacements::apply_ready`] or all at
//! once with [`PendingPlacements::wait_all`].
//!
//! Entries are independent: a failed entry is logged and reported, and
//! every other entry proceeds as if it did not exist. Completion order is
//! whatever the workers produce.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam::channel::{unbounded, Receiver, Sender, TryRecvError};

use crate::assets::{AssetError, AssetSource, GltfLoader, Manifest, ModelAsset, PlacedAsset};
use crate::scene::{NodeId, Scene};
use super::{CompositionProfile, MaterialPolicy};

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// New, uncancelled token
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
    
    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Entry that made it into the scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPlacement {
    /// Manifest index
    pub index: usize,
    /// Model path
    pub path: String,
    /// Placement root in the scene
    pub node: NodeId,
}

/// Entry that could not be loaded
#[derive(Debug)]
pub struct FailedPlacement {
    /// Manifest index
    pub index: usize,
    /// Model path
    pub path: String,
    /// Why it failed
    pub error: AssetError,
}

/// Outcome of a placement run
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Entries inserted into the scene, in completion order
    pub loaded: Vec<LoadedPlacement>,
    /// Entries that failed, in completion order
    pub failed: Vec<FailedPlacement>,
    /// Manifest indices skipped or discarded after cancellation
    pub cancelled: Vec<usize>,
}

impl LoadReport {
    /// Number of settled entries
    pub fn settled(&self) -> usize {
        self.loaded.len() + self.failed.len() + self.cancelled.len()
    }
    
    /// True when every entry was placed
    pub fn all_loaded(&self) -> bool {
        self.failed.is_empty() && self.cancelled.is_empty()
    }
    
    /// Scene node of the entry at `index`, if it was placed
    pub fn node_for(&self, index: usize) -> Option<NodeId> {
        self.loaded.iter().find(|entry| entry.index == index).map(|entry| entry.node)
    }
}

struct Completion {
    index: usize,
    result: Result<ModelAsset, AssetError>,
}

/// Starts concurrent placement loads
pub struct PlacementLoader {
    source: Arc<dyn AssetSource>,
    loader: GltfLoader,
    policy: MaterialPolicy,
}

impl PlacementLoader {
    /// Create a loader reading through `source` with the profile's decoders and material policy
    pub fn new(source: Arc<dyn AssetSource>, profile: &CompositionProfile) -> Self {
        Self {
            source,
            loader: GltfLoader::new(profile.loader),
            policy: profile.materials,
        }
    }
    
    /// Start loading every entry; returns immediately
    pub fn spawn(&self, manifest: &Manifest) -> PendingPlacements {
        let (sender, receiver) = unbounded();
        let cancel = CancelToken::new();
        let mut pending = PendingPlacements {
            entries: manifest.entries().to_vec(),
            settled: vec![false; manifest.len()],
            outstanding: manifest.len(),
            receiver,
            cancel: cancel.clone(),
            report: LoadReport::default(),
        };
        
        log::info!("Loading {} placed assets", manifest.len());
        for (index, entry) in manifest.iter().enumerate() {
            if let Err(e) = self.spawn_worker(index, entry, sender.clone(), cancel.clone()) {
                pending.fail(index, AssetError::IoError(e));
            }
        }
        pending
    }
    
    /// Load every entry and insert the results, blocking until all settle
    pub fn load_all(&self, manifest: &Manifest, scene: &mut Scene) -> LoadReport {
        self.spawn(manifest).wait_all(scene)
    }
    
    fn spawn_worker(
        &self,
        index: usize,
        entry: &PlacedAsset,
        sender: Sender<Completion>,
        cancel: CancelToken,
    ) -> std::io::Result<()> {
        let source = Arc::clone(&self.source);
        let loader = self.loader;
        let policy = self.policy;
        let path = entry.path.clone();
        
        thread::Builder::new()
            .name(format!("placement-{index}"))
            .spawn(move || {
                let result = if cancel.is_cancelled() {
                    Err(AssetError::Cancelled(path))
                } else {
                    loader.load(source.as_ref(), &path).map(|mut model| {
                        policy.apply(&mut model);
                        model
                    })
                };
                // Receiver gone means nobody is waiting any more
                let _ = sender.send(Completion { index, result });
            })
            .map(|_| ())
    }
}

/// Loads in flight for one manifest
pub struct PendingPlacements {
    entries: Vec<PlacedAsset>,
    settled: Vec<bool>,
    outstanding: usize,
    receiver: Receiver<Completion>,
    cancel: CancelToken,
    report: LoadReport,
}

impl PendingPlacements {
    /// Insert every load that has finished so far without blocking
    ///
    /// Returns the number of placements added to `scene`.
    pub fn apply_ready(&mut self, scene: &mut Scene) -> usize {
        let mut inserted = 0;
        while self.outstanding > 0 {
            match self.receiver.try_recv() {
                Ok(completion) => {
                    if self.settle(completion, scene) {
                        inserted += 1;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.abandon_outstanding();
                    break;
                }
            }
        }
        inserted
    }
    
    /// Block until every entry settles, inserting results as they arrive
    pub fn wait(&mut self, scene: &mut Scene) -> &LoadReport {
        if self.outstanding == 0 {
            return &self.report;
        }
        while self.outstanding > 0 {
            match self.receiver.recv() {
                Ok(completion) => {
                    self.settle(completion, scene);
                }
                Err(_) => self.abandon_outstanding(),
            }
        }
        log::info!(
            "Placement finished: {} loaded, {} failed, {} cancelled",
            self.report.loaded.len(),
            self.report.failed.len(),
            self.report.cancelled.len(),
        );
        &self.report
    }
    
    /// [`wait`](Self::wait), then hand over the report
    pub fn wait_all(mut self, scene: &mut Scene) -> LoadReport {
        self.wait(scene);
        self.report
    }
    
    /// Stop starting new fetches and discard results that arrive later
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
    
    /// Token shared with the workers
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }
    
    /// True once every entry has settled
    pub fn is_finished(&self) -> bool {
        self.outstanding == 0
    }
    
    /// Entries still in flight
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }
    
    /// Results so far
    pub fn report(&self) -> &LoadReport {
        &self.report
    }
    
    /// Mark `index` settled; `false` if it already was
    fn mark_settled(&mut self, index: usize) -> bool {
        match self.settled.get_mut(index) {
            Some(settled) if !*settled => {
                *settled = true;
                self.outstanding -= 1;
                true
            }
            _ => false,
        }
    }
    
    fn settle(&mut self, completion: Completion, scene: &mut Scene) -> bool {
        let Completion { index, result } = completion;
        if !self.mark_settled(index) {
            return false;
        }
        let entry = &self.entries[index];
        
        match result {
            Ok(_) if self.cancel.is_cancelled() => {
                log::debug!("Discarding {} after cancellation", entry.path);
                self.report.cancelled.push(index);
                false
            }
            Ok(model) => {
                let node = scene.insert_model(model, entry.transform(), entry.shadows);
                log::info!("Placed {} (entry {})", entry.path, index);
                self.report.loaded.push(LoadedPlacement {
                    index,
                    path: entry.path.clone(),
                    node,
                });
                true
            }
            Err(AssetError::Cancelled(_)) => {
                self.report.cancelled.push(index);
                false
            }
            Err(error) => {
                log::error!("Failed to load {} (entry {}): {}", entry.path, index, error);
                let path = entry.path.clone();
                self.report.failed.push(FailedPlacement { index, path, error });
                false
            }
        }
    }
    
    fn fail(&mut self, index: usize, error: AssetError) {
        if !self.mark_settled(index) {
            return;
        }
        let path = self.entries[index].path.clone();
        log::error!("Failed to load {} (entry {}): {}", path, index, error);
        self.report.failed.push(FailedPlacement { index, path, error });
    }
    
    /// Workers that exited without reporting are recorded as failures
    fn abandon_outstanding(&mut self) {
        let lost: Vec<usize> = (0..self.entries.len()).filter(|i| !self.settled[*i]).collect();
        for index in lost {
            let reason = format!("loader for {} exited without a result", self.entries[index].path);
            self.fail(index, AssetError::InvalidData(reason));
        }
    }
}
