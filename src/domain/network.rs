//! Network registry: the two Base chain variants and the active selector

use crate::config::NetworkOverride;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkKind {
    Mainnet,
    Sepolia,
}

impl NetworkKind {
    pub fn other(self) -> Self {
        match self {
            NetworkKind::Mainnet => NetworkKind::Sepolia,
            NetworkKind::Sepolia => NetworkKind::Mainnet,
        }
    }
}

/// Immutable description of one network target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub kind: NetworkKind,
    pub chain_id: u64,
    pub rpc_url: String,
    pub explorer_url: String,
    pub label: String,
}

impl NetworkConfig {
    pub fn base_mainnet() -> Self {
        Self {
            kind: NetworkKind::Mainnet,
            chain_id: 8453,
            rpc_url: "https://mainnet.base.org".to_string(),
            explorer_url: "https://basescan.org".to_string(),
            label: "Base Mainnet".to_string(),
        }
    }

    pub fn base_sepolia() -> Self {
        Self {
            kind: NetworkKind::Sepolia,
            chain_id: 84532,
            rpc_url: "https://sepolia.base.org".to_string(),
            explorer_url: "https://sepolia.basescan.org".to_string(),
            label: "Base Sepolia".to_string(),
        }
    }

    /// Apply user overrides; the chain id is never overridable
    fn with_override(mut self, over: Option<&NetworkOverride>) -> Self {
        let Some(over) = over else {
            return self;
        };
        if let Some(rpc) = non_empty(over.rpc.as_deref()) {
            self.rpc_url = rpc;
        }
        if let Some(explorer) = non_empty(over.explorer.as_deref()) {
            self.explorer_url = explorer.trim_end_matches('/').to_string();
        }
        if let Some(label) = non_empty(over.label.as_deref()) {
            self.label = label;
        }
        self
    }

    pub fn address_url(&self, address: &str) -> String {
        format!("{}/address/{}", self.explorer_url, address)
    }

    pub fn block_url(&self, number: u64) -> String {
        format!("{}/block/{}", self.explorer_url, number)
    }
}

/// Holds both configurations; exactly one is active
#[derive(Debug, Clone)]
pub struct NetworkRegistry {
    mainnet: NetworkConfig,
    sepolia: NetworkConfig,
    active: NetworkKind,
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl NetworkRegistry {
    pub const DEFAULT: NetworkKind = NetworkKind::Sepolia;

    pub fn new(mainnet: Option<&NetworkOverride>, sepolia: Option<&NetworkOverride>) -> Self {
        Self {
            mainnet: NetworkConfig::base_mainnet().with_override(mainnet),
            sepolia: NetworkConfig::base_sepolia().with_override(sepolia),
            active: Self::DEFAULT,
        }
    }

    pub fn get(&self, kind: NetworkKind) -> &NetworkConfig {
        match kind {
            NetworkKind::Mainnet => &self.mainnet,
            NetworkKind::Sepolia => &self.sepolia,
        }
    }

    pub fn active(&self) -> &NetworkConfig {
        self.get(self.active)
    }

    pub fn toggle(&mut self) -> &NetworkConfig {
        self.active = self.active.other();
        self.active()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_sepolia() {
        let registry = NetworkRegistry::default();
        assert_eq!(registry.active().chain_id, 84532);
        assert_eq!(registry.active().label, "Base Sepolia");
    }

    #[test]
    fn test_toggle_pairs_return_to_origin() {
        let mut registry = NetworkRegistry::default();
        let origin = registry.active().clone();

        assert_eq!(registry.toggle().chain_id, 8453);
        assert_eq!(registry.toggle(), &origin);

        for _ in 0..10 {
            registry.toggle();
        }
        assert_eq!(registry.active(), &origin);
    }

    #[test]
    fn test_overrides_keep_chain_id() {
        let over = NetworkOverride {
            rpc: Some("http://127.0.0.1:8545".into()),
            explorer: Some("https://example.org/".into()),
            label: Some("  ".into()),
        };
        let registry = NetworkRegistry::new(None, Some(&over));
        let sepolia = registry.get(NetworkKind::Sepolia);
        assert_eq!(sepolia.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(sepolia.explorer_url, "https://example.org");
        assert_eq!(sepolia.label, "Base Sepolia");
        assert_eq!(sepolia.chain_id, 84532);
        assert_eq!(registry.get(NetworkKind::Mainnet), &NetworkConfig::base_mainnet());
    }

    #[test]
    fn test_explorer_links() {
        let net = NetworkConfig::base_mainnet();
        assert_eq!(net.address_url("0xabc"), "https://basescan.org/address/0xabc");
        assert_eq!(net.block_url(100), "https://basescan.org/block/100");
    }
}
