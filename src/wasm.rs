//! Browser bindings. The view owns rendering, hint toggling and dialogs; it
//! calls `place`/`reset` on input and re-reads `state()` afterwards.

use wasm_bindgen::prelude::*;

use crate::game::BoardEngine;
use crate::types::Position;

#[wasm_bindgen]
pub struct WasmGame {
    engine: BoardEngine,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            engine: BoardEngine::new(),
        }
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Plays for the side to move. Rejections leave the game unchanged.
    pub fn place(&mut self, row: u8, col: u8) -> Result<(), JsValue> {
        let pos = Position::new(row, col).map_err(to_js_error)?;
        self.engine.apply_move(pos).map_err(to_js_error)?;
        Ok(())
    }

    /// Current `GameState` snapshot.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.engine.to_game_state())?)
    }

    /// `{row, col}` list for the side to move.
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        let moves = self.engine.legal_moves(self.engine.side_to_move());
        Ok(serde_wasm_bindgen::to_value(&moves)?)
    }

    /// `GameResult` once the game is over, `null` before that.
    pub fn result(&self) -> Result<JsValue, JsValue> {
        if !self.engine.is_over() {
            return Ok(JsValue::NULL);
        }
        Ok(serde_wasm_bindgen::to_value(&self.engine.to_game_result())?)
    }

    #[wasm_bindgen(js_name = isOver)]
    pub fn is_over(&self) -> bool {
        self.engine.is_over()
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
