use serde::Serialize;
use std::fmt::{self, Display, Formatter};

use crate::config::chain::ContractAddresses;
use crate::wallet::WalletError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Contract {
    Outfits,
    Land,
    Resources,
    Marketplace,
}

impl Display for Contract {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Outfits => "outfits",
            Self::Land => "land",
            Self::Resources => "resources",
            Self::Marketplace => "marketplace",
        };
        f.write_str(name)
    }
}

impl ContractAddresses {
    pub fn get(&self, contract: Contract) -> Option<&str> {
        let slot = match contract {
            Contract::Outfits => &self.outfits,
            Contract::Land => &self.land,
            Contract::Resources => &self.resources,
            Contract::Marketplace => &self.marketplace,
        };
        slot.as_deref().filter(|a| !a.is_empty())
    }

    pub fn require(&self, contract: Contract) -> Result<&str, WalletError> {
        self.get(contract).ok_or(WalletError::MissingContract(contract))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_missing() {
        let addresses = ContractAddresses {
            land: Some("0x9a3a4D73d33be7Ca333974377f473f3951fe8EbF".into()),
            outfits: Some(String::new()),
            ..Default::default()
        };
        assert!(addresses.require(Contract::Land).is_ok());
        assert_eq!(
            addresses.require(Contract::Outfits),
            Err(WalletError::MissingContract(Contract::Outfits))
        );
    }
}
