use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{Config, PlayerId, Round, SeatIndex, SeatStatus, Suit};
use crate::engine::betting::BettingState;
use crate::engine::bidding::BidHistory;
use crate::engine::pot::Pot;
use crate::engine::states::TableState;
use crate::engine::table::PokerTable;

/// Снимок места: кто сидит и сколько у него фишек.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatSnapshot {
    pub seat: SeatIndex,
    pub player: Option<PlayerId>,
    pub chips: Chips,
    pub round_bet: Chips,
    pub status: SeatStatus,
}

/// Снэпшот стола для хранения и передачи.
///
/// Живые части (игроки, колода, трасса автомата) сюда не попадают:
/// игроки восстанавливаются по id через реестр, карты раздаются заново,
/// а автомат продолжает с состояния `resume`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSnapshot {
    pub config: Config,
    pub seats: Vec<SeatSnapshot>,
    pub pot: Pot,
    pub round: Round,
    pub button: Option<SeatIndex>,
    pub action: Option<SeatIndex>,
    #[serde(default)]
    pub hands_played: u32,
    #[serde(default)]
    pub betting: BettingState,
    #[serde(default)]
    pub bids: BidHistory,
    #[serde(default)]
    pub trump: Option<Suit>,
    #[serde(default)]
    pub maker: Option<SeatIndex>,
    /// Следующее состояние автомата.
    #[serde(default)]
    pub resume: Option<TableState>,
}

impl TableSnapshot {
    /// Заморозить живой стол.
    pub fn from_table(table: &PokerTable) -> Self {
        let core = table.core();
        Self {
            config: core.config.clone(),
            seats: core
                .seats
                .iter()
                .map(|s| SeatSnapshot {
                    seat: s.index,
                    player: s.player_id().map(str::to_owned),
                    chips: s.chips,
                    round_bet: s.round_bet,
                    status: s.status,
                })
                .collect(),
            pot: core.pot.clone(),
            round: core.round,
            button: core.button,
            action: core.action,
            hands_played: core.hands_played,
            betting: core.betting.clone(),
            bids: core.bids.clone(),
            trump: core.trump,
            maker: core.maker,
            resume: table.next_state(),
        }
    }

    /// Сколько мест занято.
    pub fn occupied(&self) -> usize {
        self.seats.iter().filter(|s| s.player.is_some()).count()
    }
}
