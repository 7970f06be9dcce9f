//! Currency and the power-up shop.

use meteorfall_core::config::PowerUpCosts;
use meteorfall_core::constants::{CLICK_MULTIPLIER_BONUS, CLICK_VALUE};
use meteorfall_core::enums::PowerUpId;
use meteorfall_core::error::PurchaseError;
use meteorfall_core::state::{EconomyView, PowerUpView};

/// One shop entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerUp {
    pub id: PowerUpId,
    pub cost: u64,
    /// Stays true until the next explicit reset.
    pub purchased: bool,
}

impl PowerUp {
    pub fn name(&self) -> &'static str {
        self.id.name()
    }
}

/// The shop catalogue, in fixed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerUpSet {
    entries: Vec<PowerUp>,
}

impl Default for PowerUpSet {
    fn default() -> Self {
        Self::from_costs(&PowerUpCosts::default())
    }
}

impl PowerUpSet {
    pub fn from_costs(costs: &PowerUpCosts) -> Self {
        Self {
            entries: PowerUpId::ALL
                .iter()
                .map(|&id| PowerUp {
                    id,
                    cost: costs.cost(id),
                    purchased: false,
                })
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PowerUp> {
        self.entries.iter()
    }

    pub fn get(&self, id: PowerUpId) -> Option<&PowerUp> {
        self.entries.iter().find(|p| p.id == id)
    }

    pub fn is_purchased(&self, id: PowerUpId) -> bool {
        self.get(id).is_some_and(|p| p.purchased)
    }

    pub fn any_purchased(&self) -> bool {
        self.entries.iter().any(|p| p.purchased)
    }

    /// Flag an item as owned without charging for it.
    pub fn mark_purchased(&mut self, id: PowerUpId) {
        if let Some(entry) = self.entries.iter_mut().find(|p| p.id == id) {
            entry.purchased = true;
        }
    }

    pub fn clear_purchases(&mut self) {
        for entry in &mut self.entries {
            entry.purchased = false;
        }
    }
}

/// Currency balance, click multiplier and shop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Economy {
    currency: u64,
    click_multiplier: u32,
    power_ups: PowerUpSet,
}

impl Default for Economy {
    fn default() -> Self {
        Self::new(&PowerUpCosts::default())
    }
}

impl Economy {
    pub fn new(costs: &PowerUpCosts) -> Self {
        Self {
            currency: 0,
            click_multiplier: 1,
            power_ups: PowerUpSet::from_costs(costs),
        }
    }

    pub fn currency(&self) -> u64 {
        self.currency
    }

    pub fn click_multiplier(&self) -> u32 {
        self.click_multiplier
    }

    pub fn power_ups(&self) -> &PowerUpSet {
        &self.power_ups
    }

    /// Credit one planet click. Returns the amount gained.
    pub fn click(&mut self) -> u64 {
        let gained = CLICK_VALUE.saturating_mul(self.click_multiplier as u64);
        self.currency = self.currency.saturating_add(gained);
        gained
    }

    /// Add currency directly.
    pub fn deposit(&mut self, amount: u64) {
        self.currency = self.currency.saturating_add(amount);
    }

    pub fn can_afford(&self, id: PowerUpId) -> bool {
        self.power_ups
            .get(id)
            .is_some_and(|p| !p.purchased && p.cost <= self.currency)
    }

    /// Buy an item. Rejected, never partially paid, when unaffordable.
    pub fn purchase(&mut self, id: PowerUpId) -> Result<(), PurchaseError> {
        let balance = self.currency;
        let entry = self
            .power_ups
            .entries
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(PurchaseError::NotForSale(id))?;
        if entry.purchased {
            return Err(PurchaseError::AlreadyPurchased);
        }
        if entry.cost > balance {
            return Err(PurchaseError::InsufficientFunds {
                cost: entry.cost,
                balance,
            });
        }

        self.currency = balance - entry.cost;
        entry.purchased = true;
        if id == PowerUpId::ClickMultiplier {
            self.click_multiplier = CLICK_MULTIPLIER_BONUS;
        }
        Ok(())
    }

    /// Clear every purchase and the click multiplier. Currency is kept.
    pub fn reset_power_ups(&mut self) {
        self.power_ups.clear_purchases();
        self.click_multiplier = 1;
    }

    /// Back to a fresh run: no currency, nothing owned.
    pub fn reset(&mut self) {
        self.currency = 0;
        self.reset_power_ups();
    }

    pub fn view(&self) -> EconomyView {
        EconomyView {
            currency: self.currency,
            click_multiplier: self.click_multiplier,
            power_ups: self
                .power_ups
                .iter()
                .map(|p| PowerUpView {
                    id: p.id,
                    name: p.name().to_string(),
                    cost: p.cost,
                    purchased: p.purchased,
                    affordable: self.can_afford(p.id),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_order_and_costs() {
        let set = PowerUpSet::default();
        let ids: Vec<_> = set.iter().map(|p| p.id).collect();
        assert_eq!(ids, PowerUpId::ALL.to_vec());
        let costs: Vec<_> = set.iter().map(|p| p.cost).collect();
        assert_eq!(costs, vec![10, 50, 300, 2000]);
        assert!(!set.any_purchased());
    }

    #[test]
    fn click_uses_multiplier() {
        let mut economy = Economy::default();
        assert_eq!(economy.click(), 1);
        economy.deposit(9);
        economy.purchase(PowerUpId::ClickMultiplier).unwrap();
        assert_eq!(economy.currency(), 0);
        assert_eq!(economy.click(), 5);
        assert_eq!(economy.currency(), 5);
    }

    #[test]
    fn purchase_rejected_not_clamped() {
        let mut economy = Economy::default();
        economy.deposit(49);
        assert_eq!(
            economy.purchase(PowerUpId::Shield),
            Err(PurchaseError::InsufficientFunds {
                cost: 50,
                balance: 49
            })
        );
        assert_eq!(economy.currency(), 49);
        assert!(!economy.power_ups().is_purchased(PowerUpId::Shield));
    }

    #[test]
    fn purchase_twice_rejected() {
        let mut economy = Economy::default();
        economy.deposit(100);
        economy.purchase(PowerUpId::Shield).unwrap();
        assert_eq!(
            economy.purchase(PowerUpId::Shield),
            Err(PurchaseError::AlreadyPurchased)
        );
        assert_eq!(economy.currency(), 50);
    }

    #[test]
    fn missing_catalogue_entry_is_not_for_sale() {
        let mut economy = Economy {
            currency: 5000,
            click_multiplier: 1,
            power_ups: PowerUpSet {
                entries: Vec::new(),
            },
        };
        let err = economy.purchase(PowerUpId::Laser).unwrap_err();
        assert_eq!(err, PurchaseError::NotForSale(PowerUpId::Laser));
        assert_eq!(err.to_string(), "Laser is not for sale");
        assert_eq!(economy.currency(), 5000);
    }

    #[test]
    fn exact_balance_is_enough() {
        let mut economy = Economy::default();
        economy.deposit(300);
        assert!(economy.can_afford(PowerUpId::Laser));
        economy.purchase(PowerUpId::Laser).unwrap();
        assert_eq!(economy.currency(), 0);
    }

    #[test]
    fn reset_power_ups_keeps_currency() {
        let mut economy = Economy::default();
        economy.deposit(100);
        economy.purchase(PowerUpId::ClickMultiplier).unwrap();
        economy.purchase(PowerUpId::Shield).unwrap();
        economy.reset_power_ups();
        assert!(!economy.power_ups().any_purchased());
        assert_eq!(economy.click_multiplier(), 1);
        assert_eq!(economy.currency(), 40);

        economy.reset();
        assert_eq!(economy.currency(), 0);
    }

    #[test]
    fn view_reports_affordability() {
        let mut economy = Economy::default();
        economy.deposit(60);
        economy.purchase(PowerUpId::ClickMultiplier).unwrap();
        let view = economy.view();
        assert_eq!(view.currency, 50);
        assert_eq!(view.click_multiplier, 5);
        let flags: Vec<_> = view
            .power_ups
            .iter()
            .map(|p| (p.purchased, p.affordable))
            .collect();
        assert_eq!(
            flags,
            vec![(true, false), (false, true), (false, false), (false, false)]
        );
    }

    #[test]
    fn custom_costs() {
        let costs = PowerUpCosts {
            shield: 5,
            ..Default::default()
        };
        let mut economy = Economy::new(&costs);
        economy.deposit(5);
        assert!(economy.purchase(PowerUpId::Shield).is_ok());
    }
}
