//! One client per provider, built from a shared configuration source.

use gielinor_core::ProviderKind;
use gielinor_fetch::{CancellationToken, ClientConfig};

use crate::collectionlog::CollectionLogClient;
use crate::osrsbox::OsrsboxClient;
use crate::temple::TempleClient;
use crate::wiseoldman::WiseOldManClient;

/// All provider clients.
#[derive(Debug, Clone)]
pub struct GielinorClients {
    /// collectionlog.net
    pub collection_log: CollectionLogClient,
    /// osrsbox-db
    pub osrsbox: OsrsboxClient,
    /// TempleOSRS
    pub temple: TempleClient,
    /// Wise Old Man
    pub wise_old_man: WiseOldManClient,
}

impl GielinorClients {
    /// Builds every client from `configure`, called once per provider.
    pub fn new(mut configure: impl FnMut(ProviderKind) -> ClientConfig) -> Self {
        Self {
            collection_log: CollectionLogClient::new(configure(ProviderKind::CollectionLog)),
            osrsbox: OsrsboxClient::new(configure(ProviderKind::Osrsbox)),
            temple: TempleClient::new(configure(ProviderKind::Temple)),
            wise_old_man: WiseOldManClient::new(configure(ProviderKind::WiseOldMan)),
        }
    }

    /// Returns the configuration of one provider's client.
    pub fn config(&self, kind: ProviderKind) -> &ClientConfig {
        match kind {
            ProviderKind::CollectionLog => self.collection_log.config(),
            ProviderKind::Osrsbox => self.osrsbox.config(),
            ProviderKind::Temple => self.temple.config(),
            ProviderKind::WiseOldMan => self.wise_old_man.config(),
        }
    }

    /// Binds every client to `token`.
    #[must_use]
    pub fn with_cancellation(&self, token: &CancellationToken) -> Self {
        Self {
            collection_log: self.collection_log.with_cancellation(token.clone()),
            osrsbox: self.osrsbox.with_cancellation(token.clone()),
            temple: self.temple.with_cancellation(token.clone()),
            wise_old_man: self.wise_old_man.with_cancellation(token.clone()),
        }
    }
}

impl Default for GielinorClients {
    fn default() -> Self {
        Self::new(ClientConfig::for_provider)
    }
}
