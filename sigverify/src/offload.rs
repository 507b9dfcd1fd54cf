//! Variable-base multiplication offloaded to a worker thread.
//!
//! Requests and responses cross the channel as bincode-encoded byte buffers
//! tagged with a monotonically increasing id. A dispatcher thread matches
//! each response to its pending request by id and resolves it.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use curve::scalar_mul::wnaf;
use curve::{CurveId, CurveParams, EdwardsPoint, Group, JacobianPoint, MulConfig, edwards, weierstrass};
use log::{trace, warn};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::errors::VerifyError;

/// A point as it travels over the offload channel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WirePoint {
    Jacobian(JacobianPoint),
    Edwards(EdwardsPoint),
}

/// Points that can be multiplied by an [`OffloadWorker`].
pub trait OffloadPoint: Group {
    fn into_wire(self) -> WirePoint;
    fn from_wire(wire: WirePoint) -> Option<Self>;
}

impl OffloadPoint for JacobianPoint {
    fn into_wire(self) -> WirePoint {
        WirePoint::Jacobian(self)
    }

    fn from_wire(wire: WirePoint) -> Option<Self> {
        match wire {
            WirePoint::Jacobian(p) => Some(p),
            WirePoint::Edwards(_) => None,
        }
    }
}

impl OffloadPoint for EdwardsPoint {
    fn into_wire(self) -> WirePoint {
        WirePoint::Edwards(self)
    }

    fn from_wire(wire: WirePoint) -> Option<Self> {
        match wire {
            WirePoint::Edwards(p) => Some(p),
            WirePoint::Jacobian(_) => None,
        }
    }
}

/// Multiply `point` by `scalar` on `curve`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MulRequest {
    pub id: u64,
    pub curve: CurveId,
    pub point: WirePoint,
    pub scalar: BigUint,
}

/// The product for request `id`, normalized, or `None` when the request
/// named a curve the point does not belong to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MulResponse {
    pub id: u64,
    pub point: Option<WirePoint>,
}

impl MulRequest {
    fn execute(self) -> MulResponse {
        let cfg = MulConfig::default().normalized();
        let point = match (self.point, self.curve) {
            (WirePoint::Jacobian(p), id) => weierstrass(id)
                .map(|curve| WirePoint::Jacobian(wnaf::multiply(&p, &self.scalar, curve, &cfg))),
            (WirePoint::Edwards(p), id) => {
                edwards(id).map(|curve| WirePoint::Edwards(wnaf::multiply(&p, &self.scalar, curve, &cfg)))
            }
        };
        MulResponse { id: self.id, point }
    }
}

type PendingMap = Arc<Mutex<HashMap<u64, Sender<Option<WirePoint>>>>>;

/// A multiplication in flight on an [`OffloadWorker`].
#[derive(Debug)]
pub struct PendingMul<P> {
    id: u64,
    rx: Receiver<Option<WirePoint>>,
    _point: PhantomData<P>,
}

impl<P: OffloadPoint> PendingMul<P> {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Block until the worker answers.
    ///
    /// Fails with [`VerifyError::Offload`] if the worker shut down before
    /// answering or returned a point of the wrong kind.
    pub fn wait(self) -> Result<P, VerifyError> {
        let wire = self.rx.recv().map_err(|_| VerifyError::Offload)?;
        wire.and_then(P::from_wire).ok_or(VerifyError::Offload)
    }
}

/// A worker thread serving multiplication requests.
///
/// Dropping the worker closes the request channel and joins both threads;
/// requests still pending then fail with [`VerifyError::Offload`].
pub struct OffloadWorker {
    requests: Option<Sender<Vec<u8>>>,
    pending: PendingMap,
    next_id: AtomicU64,
    worker: Option<JoinHandle<()>>,
    dispatcher: Option<JoinHandle<()>>,
}

impl OffloadWorker {
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = mpsc::channel::<Vec<u8>>();
        let (response_tx, response_rx) = mpsc::channel::<Vec<u8>>();
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));

        let worker = thread::spawn(move || {
            for bytes in request_rx {
                let request: MulRequest = match bincode::deserialize(&bytes) {
                    Ok(request) => request,
                    Err(e) => {
                        warn!("offload worker dropped a malformed request: {e}");
                        continue;
                    }
                };
                let response = request.execute();
                let bytes = match bincode::serialize(&response) {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        warn!("offload worker cannot encode response {}: {e}", response.id);
                        continue;
                    }
                };
                if response_tx.send(bytes).is_err() {
                    break;
                }
            }
        });

        let dispatch_pending = Arc::clone(&pending);
        let dispatcher = thread::spawn(move || {
            for bytes in response_rx {
                let response: MulResponse = match bincode::deserialize(&bytes) {
                    Ok(response) => response,
                    Err(e) => {
                        warn!("offload dispatcher dropped a malformed response: {e}");
                        continue;
                    }
                };
                let tx = dispatch_pending
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .remove(&response.id);
                match tx {
                    Some(tx) => {
                        trace!("offload response {} resolved", response.id);
                        let _ = tx.send(response.point);
                    }
                    None => trace!("offload response {} has no pending request", response.id),
                }
            }
            // Fail whatever is still waiting.
            dispatch_pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clear();
        });

        Self {
            requests: Some(request_tx),
            pending,
            next_id: AtomicU64::new(0),
            worker: Some(worker),
            dispatcher: Some(dispatcher),
        }
    }

    /// Send `scalar * point` to the worker.
    pub fn multiply<P: OffloadPoint>(
        &self,
        point: &P,
        scalar: &BigUint,
        curve: &P::Curve,
    ) -> Result<PendingMul<P>, VerifyError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = MulRequest {
            id,
            curve: curve.id(),
            point: point.clone().into_wire(),
            scalar: scalar.clone(),
        };
        let bytes = bincode::serialize(&request).map_err(|_| VerifyError::Offload)?;

        let (tx, rx) = mpsc::channel();
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, tx);

        let sent = self
            .requests
            .as_ref()
            .is_some_and(|requests| requests.send(bytes).is_ok());
        if !sent {
            self.pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&id);
            return Err(VerifyError::Offload);
        }
        trace!("offload request {id} sent ({})", request.curve.name());

        Ok(PendingMul {
            id,
            rx,
            _point: PhantomData,
        })
    }

    /// Number of requests awaiting a response.
    pub fn pending(&self) -> usize {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Default for OffloadWorker {
    fn default() -> Self {
        Self::spawn()
    }
}

impl Drop for OffloadWorker {
    fn drop(&mut self) {
        drop(self.requests.take());
        for handle in [self.worker.take(), self.dispatcher.take()].into_iter().flatten() {
            if handle.join().is_err() {
                warn!("offload thread panicked");
            }
        }
    }
}
