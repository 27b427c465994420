use crate::*;

fn corrupt(issue: SnapshotIssue) -> GameError {
    GameError::CorruptSnapshot(issue)
}

impl<L: SlotProvider> RoundController<L> {
    /// Durable projection of the round in progress. Cards that are face up but unmatched are saved
    /// as face down. Idle and ended rounds have nothing to resume.
    pub fn snapshot(&self) -> Result<SaveData> {
        if !self.state.phase.is_live() {
            return Err(GameError::NoActiveRound);
        }
        Ok(SaveData {
            rows: self.state.rows.into(),
            columns: self.state.columns.into(),
            time_left: self.state.time_remaining,
            current_score: self.state.score,
            cards: self
                .board
                .cards()
                .iter()
                .map(|card| CardSaveData {
                    card_id: card.id,
                    sprite_name: card.face_key.clone(),
                    is_flipped: false,
                    is_matched: card.resolved,
                })
                .collect(),
        })
    }

    /// Rebuilds board and state from a snapshot and resumes play. The snapshot is checked in full
    /// before anything is replaced, so a rejected snapshot leaves the current round untouched.
    pub fn restore(&mut self, data: &SaveData) -> Result<()> {
        let invalid_grid = || {
            corrupt(SnapshotIssue::InvalidGrid {
                rows: data.rows,
                columns: data.columns,
            })
        };
        let rows = Coord::try_from(data.rows).map_err(|_| invalid_grid())?;
        let columns = Coord::try_from(data.columns).map_err(|_| invalid_grid())?;
        let pair_count = pair_count_for(rows, columns).map_err(|_| invalid_grid())?;

        let expected = mult(rows, columns) as usize;
        if data.cards.len() != expected {
            return Err(corrupt(SnapshotIssue::CardCount {
                expected,
                found: data.cards.len(),
            }));
        }
        if !data.time_left.is_finite() || data.time_left < 0. {
            return Err(corrupt(SnapshotIssue::InvalidTime(data.time_left)));
        }
        if data.current_score > pair_count {
            return Err(corrupt(SnapshotIssue::ScoreOutOfRange {
                score: data.current_score,
                pairs: pair_count,
            }));
        }

        let mut seen = vec![0u8; pair_count as usize];
        let mut matched = vec![0u8; pair_count as usize];
        let mut cards = Vec::with_capacity(expected);
        for saved in &data.cards {
            if !self.catalog().contains(&saved.sprite_name) {
                return Err(corrupt(SnapshotIssue::UnknownFace(
                    saved.sprite_name.clone(),
                )));
            }
            let count = seen
                .get_mut(saved.card_id as usize)
                .ok_or_else(|| corrupt(SnapshotIssue::IdOutOfRange(saved.card_id)))?;
            *count = count.saturating_add(1);
            if saved.is_matched {
                matched[saved.card_id as usize] += 1;
            }

            let mut card = CardRecord::new(saved.card_id, saved.sprite_name.clone());
            card.resolved = saved.is_matched;
            cards.push(card);
        }
        if let Some(id) = seen.iter().position(|&count| count != 2) {
            return Err(corrupt(SnapshotIssue::UnpairedId(id as PairKey)));
        }
        if let Some(id) = matched.iter().position(|&count| count == 1) {
            return Err(corrupt(SnapshotIssue::HalfResolvedPair(id as PairKey)));
        }
        let matched_pairs = matched.iter().filter(|&&count| count == 2).count() as CardCount;
        if matched_pairs != data.current_score {
            return Err(corrupt(SnapshotIssue::ScoreMismatch {
                score: data.current_score,
                matched: matched_pairs,
            }));
        }
        if matched_pairs == pair_count {
            return Err(corrupt(SnapshotIssue::RoundFinished));
        }

        let slots = self.slot_provider().slots(rows, columns)?;
        let board = Board::assign_layout(cards, slots)?;
        for card in board.cards() {
            if board
                .find_by_face_key(&card.face_key)
                .is_some_and(|owner| owner.id != card.id)
            {
                return Err(corrupt(SnapshotIssue::InconsistentFace(
                    card.face_key.clone(),
                )));
            }
        }

        let mut state = RoundState::new(rows, columns, self.rules().game_duration(pair_count));
        state.time_remaining = data.time_left;
        state.score = data.current_score;
        self.begin(board, state);
        log::debug!(
            "round {:?} restored: {rows}x{columns}, score {}, {}s left",
            self.generation(),
            data.current_score,
            data.time_left
        );

        self.events.push(RoundEvent::RoundRestored { rows, columns });
        self.emit_score();
        self.emit_timer();
        Ok(())
    }

    pub fn save(&self) -> Result<Vec<u8>> {
        self.snapshot()?
            .to_bytes()
            .map_err(|err| GameError::Encode(err.to_string()))
    }

    pub fn load(&mut self, bytes: &[u8]) -> Result<()> {
        let data = SaveData::from_bytes(bytes)
            .map_err(|err| corrupt(SnapshotIssue::Malformed(err.to_string())))?;
        self.restore(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> FaceCatalog {
        FaceCatalog::new(["fox", "owl", "elk", "yak"]).unwrap()
    }

    fn playing(seed: u64) -> RoundController {
        let mut round = RoundController::with_seed(RoundRules::instant(15.), catalog(), seed).unwrap();
        round.start_round(2, 2).unwrap();
        round
    }

    fn match_pair(round: &mut RoundController, id: PairKey) {
        let indices: Vec<_> = (0..round.board().len())
            .filter(|&index| round.board()[index].id == id)
            .collect();
        round.select_card(indices[0]).unwrap();
        round.select_card(indices[1]).unwrap();
        round.resolve_comparison();
    }

    fn card(id: PairKey, face: &str, matched: bool) -> CardSaveData {
        CardSaveData {
            card_id: id,
            sprite_name: face.to_string(),
            is_flipped: false,
            is_matched: matched,
        }
    }

    fn valid_data() -> SaveData {
        SaveData {
            rows: 2,
            columns: 2,
            time_left: 20.,
            current_score: 1,
            cards: vec![
                card(1, "owl", false),
                card(0, "fox", true),
                card(1, "owl", false),
                card(0, "fox", true),
            ],
        }
    }

    #[test]
    fn snapshot_lists_cards_in_board_order() {
        let mut round = playing(5);
        match_pair(&mut round, 0);
        round.tick(4.);

        let data = round.snapshot().unwrap();

        assert_eq!((data.rows, data.columns), (2, 2));
        assert_eq!(data.current_score, 1);
        assert_eq!(data.time_left, 26.);
        for (saved, card) in data.cards.iter().zip(round.board().cards()) {
            assert_eq!(saved.card_id, card.id);
            assert_eq!(saved.sprite_name, card.face_key);
            assert_eq!(saved.is_matched, card.resolved);
            assert!(!saved.is_flipped);
        }
    }

    #[test]
    fn snapshot_requires_started_round() {
        let round = RoundController::with_seed(RoundRules::instant(15.), catalog(), 0).unwrap();

        assert_eq!(round.snapshot(), Err(GameError::NoActiveRound));
    }

    #[test]
    fn round_trip_through_bytes() {
        let mut round = playing(9);
        match_pair(&mut round, 1);
        round.tick(2.5);
        let bytes = round.save().unwrap();

        let mut restored =
            RoundController::with_seed(RoundRules::instant(15.), catalog(), 1).unwrap();
        restored.load(&bytes).unwrap();

        assert_eq!(restored.phase(), RoundPhase::Playing);
        assert_eq!(restored.score(), round.score());
        assert_eq!(restored.time_remaining(), round.time_remaining());
        assert_eq!(restored.state().game_duration, 30.);
        assert_eq!(restored.snapshot().unwrap(), round.snapshot().unwrap());
        assert_eq!(restored.board().position(3), round.board().position(3));
    }

    #[test]
    fn pending_selection_is_saved_face_down() {
        let mut round = playing(11);
        round.select_card(0).unwrap();
        let data = round.snapshot().unwrap();

        let mut restored = playing(12);
        restored.restore(&data).unwrap();

        assert!(restored.board().cards().iter().all(|card| !card.revealed));
        assert!(restored.selection().is_empty());
    }

    #[test]
    fn restore_recomputes_duration_but_keeps_time_left() {
        let mut round = playing(0);
        round.restore(&valid_data()).unwrap();

        assert_eq!(round.state().game_duration, 30.);
        assert_eq!(round.time_remaining(), 20.);
        assert_eq!(round.score(), 1);
        assert!(round.board()[1].resolved && !round.board()[0].resolved);
        assert_eq!(round.events()[0], RoundEvent::RoundRestored { rows: 2, columns: 2 });
    }

    #[test]
    fn restore_bumps_generation() {
        let mut round = playing(0);
        let before = round.generation();

        round.restore(&valid_data()).unwrap();

        assert!(round.generation() > before);
    }

    fn rejected(data: SaveData) -> SnapshotIssue {
        let mut round = playing(3);
        let board = round.board().clone();
        let state = *round.state();

        let Err(GameError::CorruptSnapshot(issue)) = round.restore(&data) else {
            panic!("snapshot should be rejected");
        };
        assert_eq!(round.board(), &board);
        assert_eq!(round.state(), &state);
        issue
    }

    #[test]
    fn rejects_card_count_mismatch() {
        let mut data = valid_data();
        data.cards.pop();

        assert_eq!(
            rejected(data),
            SnapshotIssue::CardCount {
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn rejects_unknown_face() {
        let mut data = valid_data();
        data.cards[0].sprite_name = "dodo".to_string();

        assert_eq!(rejected(data), SnapshotIssue::UnknownFace("dodo".to_string()));
    }

    #[test]
    fn rejects_odd_grid() {
        let mut data = valid_data();
        data.rows = 3;
        data.columns = 1;

        assert_eq!(
            rejected(data),
            SnapshotIssue::InvalidGrid {
                rows: 3,
                columns: 1
            }
        );
    }

    #[test]
    fn rejects_unpaired_ids() {
        let mut data = valid_data();
        data.cards[2].card_id = 0;

        assert_eq!(rejected(data), SnapshotIssue::UnpairedId(0));
    }

    #[test]
    fn rejects_half_resolved_pair() {
        let mut data = valid_data();
        data.cards[3].is_matched = false;

        assert_eq!(rejected(data), SnapshotIssue::HalfResolvedPair(0));
    }

    #[test]
    fn rejects_score_not_matching_matched_pairs() {
        let mut data = valid_data();
        data.current_score = 0;

        assert_eq!(
            rejected(data),
            SnapshotIssue::ScoreMismatch {
                score: 0,
                matched: 1
            }
        );
    }

    #[test]
    fn rejects_finished_board() {
        let mut data = valid_data();
        data.current_score = 2;
        for card in &mut data.cards {
            card.is_matched = true;
        }

        assert_eq!(rejected(data), SnapshotIssue::RoundFinished);
    }

    #[test]
    fn ended_round_has_no_snapshot() {
        let mut round = playing(2);
        match_pair(&mut round, 0);
        match_pair(&mut round, 1);
        assert!(round.phase().is_won());

        assert_eq!(round.snapshot(), Err(GameError::NoActiveRound));
        assert_eq!(round.save(), Err(GameError::NoActiveRound));

        let mut lost = playing(4);
        lost.tick(31.);
        assert_eq!(lost.snapshot(), Err(GameError::NoActiveRound));
    }

    #[test]
    fn restore_queues_restored_events() {
        let mut round = playing(0);
        round.drain_events();
        round.restore(&valid_data()).unwrap();

        assert_eq!(
            round.drain_events(),
            vec![
                RoundEvent::RoundRestored { rows: 2, columns: 2 },
                RoundEvent::ScoreChanged(1),
                RoundEvent::TimerChanged(20. / 30.),
            ]
        );
    }

    #[test]
    fn rejects_id_out_of_range() {
        let mut data = valid_data();
        data.cards[0].card_id = 7;

        assert_eq!(rejected(data), SnapshotIssue::IdOutOfRange(7));
    }

    #[test]
    fn rejects_face_shared_between_pairs() {
        let mut data = valid_data();
        data.cards[1].sprite_name = "owl".to_string();
        data.cards[3].sprite_name = "owl".to_string();

        assert_eq!(rejected(data), SnapshotIssue::InconsistentFace("owl".to_string()));
    }

    #[test]
    fn rejects_negative_time_and_excess_score() {
        let mut data = valid_data();
        data.time_left = -1.;
        assert_eq!(rejected(data), SnapshotIssue::InvalidTime(-1.));

        let mut data = valid_data();
        data.current_score = 3;
        assert_eq!(
            rejected(data),
            SnapshotIssue::ScoreOutOfRange { score: 3, pairs: 2 }
        );
    }

    #[test]
    fn rejects_malformed_bytes() {
        let mut round = playing(3);

        assert!(matches!(
            round.load(b"not json"),
            Err(GameError::CorruptSnapshot(SnapshotIssue::Malformed(_)))
        ));
        assert_eq!(round.phase(), RoundPhase::Playing);
    }
}
