use tracing::warn;

use crate::{
	neo_clients::{rpc::JsonRpcProvider, ProviderError, RpcClient},
	neo_types::StackItem,
};

/// A server-side iterator session.
///
/// Nodes with sessions enabled return an iterator stack item plus a
/// session id from `invokescript`; this value carries both ids and the
/// client, and pages through the items with `traverseiterator`.
///
/// Sessions expire server-side. Call [`NeoIterator::close`] when done;
/// dropping an unclosed iterator only logs a warning, since no RPC can
/// be awaited during drop. For nodes with sessions disabled, build an
/// unwrap script with
/// [`crate::builder::ScriptBuilder::build_contract_call_and_unwrap_iterator`]
/// instead.
#[derive(Debug)]
pub struct NeoIterator<'a, P: JsonRpcProvider> {
	client: &'a RpcClient<P>,
	session_id: String,
	iterator_id: String,
	closed: bool,
}

impl<'a, P: JsonRpcProvider> NeoIterator<'a, P> {
	pub fn new(client: &'a RpcClient<P>, session_id: String, iterator_id: String) -> Self {
		Self { client, session_id, iterator_id, closed: false }
	}

	pub fn session_id(&self) -> &str {
		&self.session_id
	}

	pub fn iterator_id(&self) -> &str {
		&self.iterator_id
	}

	/// Fetches up to `count` more items.
	pub async fn next(&self, count: u32) -> Result<Vec<StackItem>, ProviderError> {
		self.client.traverse_iterator(&self.session_id, &self.iterator_id, count).await
	}

	/// Terminates the server-side session.
	pub async fn close(mut self) -> Result<bool, ProviderError> {
		self.closed = true;
		self.client.terminate_session(&self.session_id).await
	}
}

impl<'a, P: JsonRpcProvider> Drop for NeoIterator<'a, P> {
	fn drop(&mut self) {
		if !self.closed {
			warn!(
				session_id = %self.session_id,
				"iterator session dropped without close(); it will linger until the node expires it"
			);
		}
	}
}
