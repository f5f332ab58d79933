//! WebAssembly bindings for the Guinote game engine.
//!
//! This module exposes the engine to JavaScript through wasm-bindgen.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::actions::GameAction;
#[cfg(feature = "wasm")]
use crate::bot::{Bot, BotDifficulty};
#[cfg(feature = "wasm")]
use crate::game::GameState;
#[cfg(feature = "wasm")]
use crate::snapshot::GameSnapshot;

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmGame {
    state: GameState,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmGame {
    /// Create a new table from a JSON array of exactly four names
    #[wasm_bindgen(constructor)]
    pub fn new(player_names_json: &str, seed: u64) -> Result<WasmGame, JsValue> {
        let names: Vec<String> = serde_json::from_str(player_names_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid player names: {}", e)))?;

        let names: [String; 4] = names
            .try_into()
            .map_err(|_| JsValue::from_str("Guinote takes exactly 4 players"))?;
        let [a, b, c, d] = &names;

        Ok(WasmGame {
            state: GameState::new_table([a.as_str(), b.as_str(), c.as_str(), d.as_str()], seed),
        })
    }

    /// Restore a game from a snapshot produced by `getState`
    #[wasm_bindgen(js_name = fromState)]
    pub fn from_state(snapshot_json: &str) -> Result<WasmGame, JsValue> {
        let state = crate::snapshot::from_json(snapshot_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid snapshot: {}", e)))?;
        Ok(WasmGame { state })
    }

    /// Get the current game state as snapshot JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        let snapshot = GameSnapshot::capture(&self.state);
        serde_json::to_string(&snapshot).unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the seat whose turn it is
    #[wasm_bindgen(js_name = getCurrentPlayer)]
    pub fn get_current_player(&self) -> u8 {
        self.state.current_player
    }

    /// Get valid actions for the current player as JSON array
    #[wasm_bindgen(js_name = getValidActions)]
    pub fn get_valid_actions(&self) -> String {
        let actions = self.state.valid_actions(self.state.current_player);
        serde_json::to_string(&actions).unwrap_or_else(|_| "[]".to_string())
    }

    /// Get valid actions for a specific seat as JSON array
    #[wasm_bindgen(js_name = getValidActionsForPlayer)]
    pub fn get_valid_actions_for_player(&self, seat: u8) -> String {
        let actions = self.state.valid_actions(seat);
        serde_json::to_string(&actions).unwrap_or_else(|_| "[]".to_string())
    }

    /// Apply an action from JSON, returns events JSON or error
    #[wasm_bindgen(js_name = applyAction)]
    pub fn apply_action(&mut self, seat: u8, action_json: &str) -> Result<String, JsValue> {
        let action: GameAction = serde_json::from_str(action_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid action JSON: {}", e)))?;

        match self.state.apply_action(seat, &action) {
            Ok((next, events)) => {
                self.state = next;
                Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string()))
            }
            Err(e) => Err(JsValue::from_str(&format!("Action failed: {}", e))),
        }
    }

    /// Check if the partida is finished
    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Get the winning team (if the partida is finished)
    #[wasm_bindgen(js_name = getWinner)]
    pub fn get_winner(&self) -> Option<u8> {
        self.state.winner()
    }

    /// Get a team's running score (card points plus cantes)
    #[wasm_bindgen(js_name = getTeamScore)]
    pub fn get_team_score(&self, team: u8) -> u32 {
        self.state
            .teams
            .get(team as usize)
            .map(|t| t.score)
            .unwrap_or(0)
    }

    /// Get the current phase as a string
    #[wasm_bindgen(js_name = getPhase)]
    pub fn get_phase(&self) -> String {
        serde_json::to_string(&self.state.phase).unwrap_or_else(|_| "\"unknown\"".to_string())
    }

    /// Get the face-up trump card as JSON
    #[wasm_bindgen(js_name = getTrumpCard)]
    pub fn get_trump_card(&self) -> String {
        serde_json::to_string(&self.state.trump_card).unwrap_or_else(|_| "null".to_string())
    }

    /// Get a seat's hand as JSON (for rendering)
    #[wasm_bindgen(js_name = getHand)]
    pub fn get_hand(&self, seat: u8) -> String {
        serde_json::to_string(self.state.hand(seat)).unwrap_or_else(|_| "[]".to_string())
    }

    /// Get the trick currently on the table as JSON
    #[wasm_bindgen(js_name = getCurrentTrick)]
    pub fn get_current_trick(&self) -> String {
        serde_json::to_string(&self.state.current_trick).unwrap_or_else(|_| "[]".to_string())
    }

    /// Get a bot's suggested action for a seat
    /// difficulty: "Easy", "Medium", or "Hard"
    #[wasm_bindgen(js_name = getBotAction)]
    pub fn get_bot_action(&self, seat: u8, difficulty: &str) -> String {
        let diff = match difficulty {
            "Easy" => BotDifficulty::Easy,
            "Medium" => BotDifficulty::Medium,
            "Hard" => BotDifficulty::Hard,
            _ => BotDifficulty::Medium,
        };

        let mut bot = Bot::new(seat, diff);
        match bot.choose_action(&self.state) {
            Some(action) => serde_json::to_string(&action).unwrap_or_else(|_| "null".to_string()),
            None => "null".to_string(),
        }
    }
}
