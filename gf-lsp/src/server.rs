//! Main language server implementation

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::features::commands::{parse_open_args, COMMANDS, COMMAND_OPEN_UNDER_CURSOR};
use crate::features::goto_file::{
    file_under_cursor, open_under_cursor, CursorRequest, FileTarget,
};
use gf_config::GfConfig;
use gf_core::{ActionError, CandidateOptions};
use serde_json::Value;
use tokio::sync::RwLock;
use tower_lsp::async_trait;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::{
    ExecuteCommandOptions, ExecuteCommandParams, GotoDefinitionParams, GotoDefinitionResponse,
    InitializeParams, InitializeResult, InitializedParams, Location, LocationLink, MessageType,
    OneOf, Position, Range, ServerCapabilities, ServerInfo, ShowDocumentParams,
    TextDocumentItem, TextDocumentSyncCapability, TextDocumentSyncKind, Url,
    WorkDoneProgressOptions,
};
use tower_lsp::Client;
use tracing::{debug, warn};

/// The parts of the client the server talks back to.
#[async_trait]
pub trait LspClient: Send + Sync + Clone + 'static {
    async fn show_document(&self, params: ShowDocumentParams) -> Result<bool>;
    async fn log_message(&self, kind: MessageType, message: String);
}

#[async_trait]
impl LspClient for Client {
    async fn show_document(&self, params: ShowDocumentParams) -> Result<bool> {
        Client::show_document(self, params).await
    }

    async fn log_message(&self, kind: MessageType, message: String) {
        Client::log_message(self, kind, message).await
    }
}

pub trait FeatureProvider: Send + Sync + 'static {
    fn file_under_cursor(
        &self,
        request: &CursorRequest<'_>,
    ) -> std::result::Result<Option<FileTarget>, ActionError>;
    fn open_under_cursor(
        &self,
        request: &CursorRequest<'_>,
    ) -> std::result::Result<Option<PathBuf>, ActionError>;
}

#[derive(Default)]
pub struct DefaultFeatureProvider {
    options: CandidateOptions,
}

impl DefaultFeatureProvider {
    pub fn new(options: CandidateOptions) -> Self {
        Self { options }
    }
}

impl FeatureProvider for DefaultFeatureProvider {
    fn file_under_cursor(
        &self,
        request: &CursorRequest<'_>,
    ) -> std::result::Result<Option<FileTarget>, ActionError> {
        file_under_cursor(request, self.options)
    }

    fn open_under_cursor(
        &self,
        request: &CursorRequest<'_>,
    ) -> std::result::Result<Option<PathBuf>, ActionError> {
        open_under_cursor(request, self.options)
    }
}

#[derive(Default)]
struct DocumentStore {
    entries: RwLock<HashMap<Url, Arc<String>>>,
}

impl DocumentStore {
    async fn upsert(&self, uri: Url, text: String) {
        self.entries.write().await.insert(uri, Arc::new(text));
    }

    async fn get(&self, uri: &Url) -> Option<Arc<String>> {
        self.entries.read().await.get(uri).cloned()
    }

    async fn remove(&self, uri: &Url) {
        self.entries.write().await.remove(uri);
    }
}

pub struct GfLanguageServer<C = Client, P = DefaultFeatureProvider> {
    client: C,
    documents: DocumentStore,
    features: Arc<P>,
    take_focus: bool,
    link_support: AtomicBool,
}

impl GfLanguageServer<Client, DefaultFeatureProvider> {
    pub fn new(client: Client) -> Self {
        Self::with_features(client, Arc::new(DefaultFeatureProvider::default()))
    }

    pub fn with_config(client: Client, config: &GfConfig) -> Self {
        let features = DefaultFeatureProvider::new(config.open.candidate_options());
        Self::with_features(client, Arc::new(features)).take_focus(config.open.take_focus)
    }
}

impl<C, P> GfLanguageServer<C, P>
where
    C: LspClient,
    P: FeatureProvider,
{
    pub fn with_features(client: C, features: Arc<P>) -> Self {
        Self {
            client,
            documents: DocumentStore::default(),
            features,
            take_focus: true,
            link_support: AtomicBool::new(false),
        }
    }

    pub fn take_focus(mut self, take_focus: bool) -> Self {
        self.take_focus = take_focus;
        self
    }

    async fn open_from_command(&self, arguments: &[Value]) -> Result<Option<Value>> {
        let args = parse_open_args(arguments)?;
        let Some(text) = self.documents.get(&args.uri).await else {
            return Err(Error::invalid_params(format!(
                "document {} is not open",
                args.uri
            )));
        };

        let request = CursorRequest {
            text: text.as_str(),
            uri: &args.uri,
            position: args.position,
            selection: args.selection.as_deref(),
        };
        let path = self
            .features
            .open_under_cursor(&request)
            .map_err(|err| Error::invalid_params(err.to_string()))?;

        let Some(path) = path else {
            self.client
                .log_message(
                    MessageType::INFO,
                    "No existing file under the cursor, not opening anything".to_string(),
                )
                .await;
            return Ok(Some(Value::Bool(false)));
        };

        let Ok(uri) = Url::from_file_path(&path) else {
            warn!(path = %path.display(), "cannot express path as a file URI");
            return Ok(Some(Value::Bool(false)));
        };
        let shown = self
            .client
            .show_document(ShowDocumentParams {
                uri,
                external: Some(false),
                take_focus: Some(self.take_focus),
                selection: None,
            })
            .await?;
        Ok(Some(Value::Bool(shown)))
    }
}

fn file_start() -> Range {
    Range::new(Position::new(0, 0), Position::new(0, 0))
}

fn to_definition_response(target: FileTarget, links: bool) -> Option<GotoDefinitionResponse> {
    let uri = Url::from_file_path(&target.path).ok()?;
    if links {
        Some(GotoDefinitionResponse::Link(vec![LocationLink {
            origin_selection_range: target.origin,
            target_uri: uri,
            target_range: file_start(),
            target_selection_range: file_start(),
        }]))
    } else {
        Some(GotoDefinitionResponse::Scalar(Location::new(uri, file_start())))
    }
}

#[async_trait]
impl<C, P> tower_lsp::LanguageServer for GfLanguageServer<C, P>
where
    C: LspClient,
    P: FeatureProvider,
{
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let links = params
            .capabilities
            .text_document
            .as_ref()
            .and_then(|text| text.definition.as_ref())
            .and_then(|definition| definition.link_support)
            .unwrap_or(false);
        self.link_support.store(links, Ordering::Relaxed);

        let capabilities = ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            definition_provider: Some(OneOf::Left(true)),
            execute_command_provider: Some(ExecuteCommandOptions {
                commands: COMMANDS.iter().map(|command| command.to_string()).collect(),
                work_done_progress_options: WorkDoneProgressOptions::default(),
            }),
            ..ServerCapabilities::default()
        };

        Ok(InitializeResult {
            capabilities,
            server_info: Some(ServerInfo {
                name: "gf-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {}

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: lsp_types::DidOpenTextDocumentParams) {
        let TextDocumentItem { uri, text, .. } = params.text_document;
        self.documents.upsert(uri, text).await;
    }

    async fn did_change(&self, params: lsp_types::DidChangeTextDocumentParams) {
        if let Some(change) = params.content_changes.into_iter().last() {
            self.documents
                .upsert(params.text_document.uri, change.text)
                .await;
        }
    }

    async fn did_close(&self, params: lsp_types::DidCloseTextDocumentParams) {
        self.documents.remove(&params.text_document.uri).await;
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let position_params = params.text_document_position_params;
        let uri = position_params.text_document.uri;
        let Some(text) = self.documents.get(&uri).await else {
            return Ok(None);
        };

        let request = CursorRequest {
            text: text.as_str(),
            uri: &uri,
            position: position_params.position,
            selection: None,
        };
        match self.features.file_under_cursor(&request) {
            Ok(Some(target)) => Ok(to_definition_response(
                target,
                self.link_support.load(Ordering::Relaxed),
            )),
            Ok(None) => Ok(None),
            Err(err) => {
                debug!(%err, "definition lookup failed");
                Ok(None)
            }
        }
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        match params.command.as_str() {
            COMMAND_OPEN_UNDER_CURSOR => self.open_from_command(&params.arguments).await,
            _ => Err(Error::invalid_request()),
        }
    }
}
