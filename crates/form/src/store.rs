use std::future::Future;

use api_types::operation::Operation;

use crate::{error::StoreError, form::OperationId};

/// Remote operation storage.
///
/// `create` and `update` resolve to the record echoed back by the server,
/// or `None` when the response succeeded without a readable body.
pub trait OperationStore: Send + Sync {
    fn get(&self, id: OperationId) -> impl Future<Output = Result<Operation, StoreError>> + Send;

    fn create(
        &self,
        operation: &Operation,
    ) -> impl Future<Output = Result<Option<Operation>, StoreError>> + Send;

    fn update(
        &self,
        id: OperationId,
        operation: &Operation,
    ) -> impl Future<Output = Result<Option<Operation>, StoreError>> + Send;

    fn delete(&self, id: OperationId) -> impl Future<Output = Result<(), StoreError>> + Send;
}
