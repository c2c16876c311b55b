use std::sync::Arc;

use service::medicine::MedicineStore;

/// Shared handler state. Holds no data itself; the store re-reads its file per call.
#[derive(Clone)]
pub struct ServerState {
    pub medicines: Arc<dyn MedicineStore>,
}

impl ServerState {
    pub fn new(medicines: Arc<dyn MedicineStore>) -> Self {
        Self { medicines }
    }
}
