//! Driver selection
//!
//! Each KPI category carries two small pools of candidate explanations:
//! one for growth, one for decline. A selection samples two distinct
//! entries from the pool matching the trend direction (both pools when the
//! trend is stable).

use kpi_spi::{AnalysisError, Direction, DriverPools, DriverSelector, Result, DRIVER_COUNT};
use rand::seq::SliceRandom;
use rand::RngCore;
use std::collections::HashMap;
use tracing::{debug, error};

/// Registry of driver pools keyed by category name
#[derive(Debug, Clone)]
pub struct DriverCatalog {
    pools: HashMap<String, DriverPools>,
}

impl DriverCatalog {
    /// Catalog with no categories
    pub fn empty() -> Self {
        Self {
            pools: HashMap::new(),
        }
    }

    /// Register (or replace) the pools of a category
    pub fn register(&mut self, category: impl Into<String>, pools: DriverPools) -> &mut Self {
        self.pools.insert(category.into().trim().to_string(), pools);
        self
    }

    pub fn pools(&self, category: &str) -> Option<&DriverPools> {
        self.pools.get(category.trim())
    }

    /// Registered category names, sorted
    pub fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.pools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Select drivers using the thread-local generator
    pub fn select_ambient(&self, category: &str, direction: Direction) -> Result<Vec<String>> {
        self.select(category, direction, &mut rand::thread_rng())
    }

    fn builtin() -> Result<Self> {
        let mut catalog = Self::empty();
        catalog
            .register(
                "Финансы",
                DriverPools::new(
                    [
                        "Рост выручки от ключевых клиентов",
                        "Снижение операционных расходов",
                        "Оптимизация ценовой политики",
                    ],
                    [
                        "Рост себестоимости",
                        "Снижение маржинальности",
                        "Задержки платежей от контрагентов",
                    ],
                )?,
            )
            .register(
                "Продажи",
                DriverPools::new(
                    [
                        "Успешная маркетинговая кампания",
                        "Расширение клиентской базы",
                        "Сезонный рост спроса",
                    ],
                    [
                        "Усиление конкуренции",
                        "Сезонное снижение спроса",
                        "Перебои в цепочке поставок",
                    ],
                )?,
            )
            .register(
                "Маркетинг",
                DriverPools::new(
                    [
                        "Рост эффективности рекламных каналов",
                        "Вирусный охват в социальных сетях",
                    ],
                    [
                        "Рост стоимости привлечения клиента",
                        "Снижение конверсии посадочных страниц",
                    ],
                )?,
            )
            .register(
                "Операции",
                DriverPools::new(
                    [
                        "Автоматизация процессов",
                        "Сокращение времени обработки заказов",
                    ],
                    ["Перебои в логистике", "Нехватка персонала"],
                )?,
            )
            .register(
                "Клиенты",
                DriverPools::new(
                    [
                        "Улучшение качества поддержки",
                        "Запуск программы лояльности",
                        "Персонализация предложений",
                    ],
                    [
                        "Рост оттока клиентов",
                        "Снижение удовлетворённости сервисом",
                    ],
                )?,
            );
        Ok(catalog)
    }
}

impl Default for DriverCatalog {
    /// Catalog with the dashboard's built-in categories
    fn default() -> Self {
        Self::builtin().unwrap_or_else(|e| {
            error!(error = %e, "built-in driver table is invalid");
            Self::empty()
        })
    }
}

impl DriverSelector for DriverCatalog {
    fn select(
        &self,
        category: &str,
        direction: Direction,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<String>> {
        let pools = self
            .pools(category)
            .ok_or_else(|| AnalysisError::UnknownCategory(category.to_string()))?;

        let candidates = match direction {
            Direction::Positive => pools.positive().to_vec(),
            Direction::Negative => pools.negative().to_vec(),
            Direction::Neutral => pools.union(),
        };

        let mut drivers: Vec<String> = candidates
            .choose_multiple(rng, DRIVER_COUNT)
            .cloned()
            .collect();
        drivers.shuffle(rng);

        debug!(category, ?direction, ?drivers, "selected drivers");
        Ok(drivers)
    }

    fn has_category(&self, category: &str) -> bool {
        self.pools.contains_key(category.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_builtin_table_validates() {
        let catalog = DriverCatalog::builtin().unwrap();
        assert_eq!(catalog.categories().len(), 5);
        for category in catalog.categories() {
            let pools = catalog.pools(category).unwrap();
            assert!(pools.positive().len() >= DRIVER_COUNT);
            assert!(pools.negative().len() >= DRIVER_COUNT);
        }
    }

    #[test]
    fn test_builtin_categories() {
        let catalog = DriverCatalog::default();
        assert_eq!(
            catalog.categories(),
            vec!["Клиенты", "Маркетинг", "Операции", "Продажи", "Финансы"]
        );
    }

    #[test]
    fn test_shape_for_every_category_and_direction() {
        let catalog = DriverCatalog::default();
        let mut rng = StdRng::seed_from_u64(7);
        for category in catalog.categories() {
            for direction in [Direction::Positive, Direction::Negative, Direction::Neutral] {
                for _ in 0..20 {
                    let drivers = catalog.select(category, direction, &mut rng).unwrap();
                    assert_eq!(drivers.len(), DRIVER_COUNT);
                    assert_ne!(drivers[0], drivers[1]);
                }
            }
        }
    }

    #[test]
    fn test_positive_drivers_come_from_positive_pool() {
        let catalog = DriverCatalog::default();
        let pools = catalog.pools("Финансы").unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let drivers = catalog
                .select("Финансы", Direction::Positive, &mut rng)
                .unwrap();
            assert!(drivers.iter().all(|d| pools.positive().contains(d)));
        }
    }

    #[test]
    fn test_negative_drivers_come_from_negative_pool() {
        let catalog = DriverCatalog::default();
        let pools = catalog.pools("Продажи").unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..50 {
            let drivers = catalog
                .select("Продажи", Direction::Negative, &mut rng)
                .unwrap();
            assert!(drivers.iter().all(|d| pools.negative().contains(d)));
        }
    }

    #[test]
    fn test_neutral_draws_from_union() {
        let catalog = DriverCatalog::default();
        let pools = catalog.pools("Маркетинг").unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let drivers = catalog
                .select("Маркетинг", Direction::Neutral, &mut rng)
                .unwrap();
            assert!(drivers.iter().all(|d| pools.contains(d)));
        }
    }

    #[test]
    fn test_same_seed_same_selection() {
        let catalog = DriverCatalog::default();
        let a = catalog
            .select("Клиенты", Direction::Neutral, &mut StdRng::seed_from_u64(99))
            .unwrap();
        let b = catalog
            .select("Клиенты", Direction::Neutral, &mut StdRng::seed_from_u64(99))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_category() {
        let catalog = DriverCatalog::default();
        let result = catalog.select("Погода", Direction::Positive, &mut StdRng::seed_from_u64(0));
        assert_eq!(result, Err(AnalysisError::UnknownCategory("Погода".to_string())));
        assert!(!catalog.has_category("Погода"));
    }

    #[test]
    fn test_empty_catalog_knows_nothing() {
        let catalog = DriverCatalog::empty();
        assert!(catalog.select_ambient("Финансы", Direction::Positive).is_err());
    }

    #[test]
    fn test_register_custom_category() {
        let mut catalog = DriverCatalog::empty();
        catalog.register(
            " HR ",
            DriverPools::new(["Hiring push", "Lower attrition"], ["Layoffs", "Burnout"]).unwrap(),
        );
        assert!(catalog.has_category("HR"));
        let drivers = catalog.select_ambient("HR", Direction::Negative).unwrap();
        assert_eq!(drivers.len(), 2);
        assert!(drivers.contains(&"Layoffs".to_string()));
        assert!(drivers.contains(&"Burnout".to_string()));
    }
}
