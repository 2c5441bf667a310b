use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chips::Chips;

/// Максимум мест за столом.
pub const MAX_SEATS: u8 = 10;

/// Тарабиш играется вчетвером (или меньше): 36 карт по 9 на руку.
pub const TARABISH_MAX_SEATS: u8 = 4;

/// Лимит ставок (бет + рейзы) за раунд в фикс-лимите. Большой блайнд считается первой ставкой.
pub const FIXED_LIMIT_BET_CAP: u8 = 4;

/// Вариант игры за столом.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Game {
    #[default]
    Holdem,
    Tarabish,
}

/// Структура лимитов.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Limit {
    #[default]
    NoLimit,
    PotLimit,
    FixedLimit,
}

/// Стейки стола. В холдеме small_bet/big_bet – это блайнды.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stakes {
    pub small_bet: Chips,
    pub big_bet: Chips,
    pub ante: Chips,
}

impl Stakes {
    pub fn new(small_bet: Chips, big_bet: Chips, ante: Chips) -> Self {
        Self {
            small_bet,
            big_bet,
            ante,
        }
    }
}

/// Кому достаются нечётные фишки при делёжке банка.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum OddChipRule {
    /// По кругу, начиная с первого места слева от кнопки.
    #[default]
    LeftOfButton,
    /// По возрастанию индекса места.
    LowestSeat,
}

/// Правило закрытия торговли в Тарабише.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum BiddingRule {
    /// Первый, кто назвал козырь, забирает торговлю.
    /// Дилер говорит последним и не может пасовать, если пасовали все (stick the dealer).
    #[default]
    FirstCall,
    /// Аукцион: каждая заявка старше предыдущей; торговля закрывается после
    /// (мест − 1) пасов подряд после заявки или по достижении `max_bids`.
    /// Если пасовали все – пересдача.
    Auction { max_bids: usize },
}

/// Конфиг стола. Не меняется после создания стола.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub game: Game,
    #[serde(default)]
    pub limit: Limit,
    #[serde(default)]
    pub stakes: Stakes,
    pub num_of_seats: u8,
    #[serde(default)]
    pub odd_chip: OddChipRule,
    #[serde(default)]
    pub bidding: BiddingRule,
}

/// Ошибки конфигурации стола.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Количество мест {0} вне диапазона 2..={max}", max = MAX_SEATS)]
    SeatCount(u8),

    #[error("Для Тарабиша нужно от 2 до {max} мест, задано {0}", max = TARABISH_MAX_SEATS)]
    TarabishSeatCount(u8),

    #[error("Большая ставка {big} меньше малой {small}")]
    StakesOrder { small: Chips, big: Chips },

    #[error("Лимит заявок аукциона {max_bids} меньше числа мест {seats}")]
    AuctionTooShort { max_bids: usize, seats: u8 },

    #[error("Некорректный JSON конфига: {0}")]
    Json(String),
}

impl Config {
    /// Проверка инвариантов конфига.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_SEATS).contains(&self.num_of_seats) {
            return Err(ConfigError::SeatCount(self.num_of_seats));
        }
        if self.stakes.big_bet < self.stakes.small_bet {
            return Err(ConfigError::StakesOrder {
                small: self.stakes.small_bet,
                big: self.stakes.big_bet,
            });
        }
        if self.game == Game::Tarabish {
            if self.num_of_seats > TARABISH_MAX_SEATS {
                return Err(ConfigError::TarabishSeatCount(self.num_of_seats));
            }
            if let BiddingRule::Auction { max_bids } = self.bidding {
                if max_bids < self.num_of_seats as usize {
                    return Err(ConfigError::AuctionTooShort {
                        max_bids,
                        seats: self.num_of_seats,
                    });
                }
            }
        }
        Ok(())
    }

    /// Загрузить и проверить конфиг из JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
