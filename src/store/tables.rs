//! In-memory tables for teams, players, matches and settings.

use crate::models::{
    MatchId, MatchSlot, MatchStatus, Participant, Player, PlayerId, PlayerStatistics, Round, Team,
    TeamId, TournamentError, TournamentSettings,
};
use crate::store::{MatchStore, TeamDirectory};

/// The full tournament data set. Cloned to stage a transaction.
#[derive(Clone, Debug, Default)]
pub struct Tables {
    teams: Vec<Team>,
    players: Vec<Player>,
    matches: Vec<MatchSlot>,
    settings: TournamentSettings,
}

impl Tables {
    pub fn with_settings(settings: TournamentSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    // Teams

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Add a team. Names are trimmed and must be unique (case-insensitive).
    pub fn insert_team(&mut self, mut team: Team) -> Result<TeamId, TournamentError> {
        team.name = team.name.trim().to_string();
        if team.name.is_empty() {
            return Err(TournamentError::MissingField("name"));
        }
        self.check_unique_team_name(&team.name, team.id)?;
        let id = team.id;
        self.teams.push(team);
        Ok(id)
    }

    /// Replace a team's details. The captain, if set, must play for the team.
    pub fn update_team(&mut self, mut team: Team) -> Result<(), TournamentError> {
        team.name = team.name.trim().to_string();
        if team.name.is_empty() {
            return Err(TournamentError::MissingField("name"));
        }
        self.check_unique_team_name(&team.name, team.id)?;
        if let Some(captain) = team.captain_id {
            let plays_for_team = self
                .players
                .iter()
                .any(|p| p.id == captain && p.team_id == team.id);
            if !plays_for_team {
                return Err(TournamentError::PlayerNotFound(captain));
            }
        }
        let slot = self
            .teams
            .iter_mut()
            .find(|t| t.id == team.id)
            .ok_or(TournamentError::TeamNotFound(team.id))?;
        *slot = team;
        Ok(())
    }

    /// Remove a team and its players. Refused while any match names the team
    /// as a side or winner.
    pub fn delete_team(&mut self, id: TeamId) -> Result<Team, TournamentError> {
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == id)
            .ok_or(TournamentError::TeamNotFound(id))?;
        let in_use = self.matches.iter().any(|m| {
            m.winner_id == Some(id) || m.participants().contains(&Participant::Team(id))
        });
        if in_use {
            return Err(TournamentError::TeamInUse(id));
        }
        self.players.retain(|p| p.team_id != id);
        Ok(self.teams.remove(idx))
    }

    fn check_unique_team_name(&self, name: &str, own_id: TeamId) -> Result<(), TournamentError> {
        let taken = self
            .teams
            .iter()
            .any(|t| t.id != own_id && t.name.eq_ignore_ascii_case(name));
        if taken {
            return Err(TournamentError::DuplicateTeamName(name.to_string()));
        }
        Ok(())
    }

    // Players

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Players of one team, ordered by jersey number (unnumbered last).
    pub fn team_players(&self, team_id: TeamId) -> Vec<&Player> {
        let mut players: Vec<_> = self.players.iter().filter(|p| p.team_id == team_id).collect();
        players.sort_by_key(|p| (p.jersey_number.is_none(), p.jersey_number));
        players
    }

    pub fn insert_player(&mut self, mut player: Player) -> Result<PlayerId, TournamentError> {
        player.name = player.name.trim().to_string();
        if player.name.is_empty() {
            return Err(TournamentError::MissingField("name"));
        }
        if self.team(player.team_id).is_none() {
            return Err(TournamentError::TeamNotFound(player.team_id));
        }
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Replace a player's profile. Statistics are kept from the stored record.
    pub fn update_player(&mut self, mut player: Player) -> Result<(), TournamentError> {
        player.name = player.name.trim().to_string();
        if player.name.is_empty() {
            return Err(TournamentError::MissingField("name"));
        }
        if self.team(player.team_id).is_none() {
            return Err(TournamentError::TeamNotFound(player.team_id));
        }
        let stored = self
            .players
            .iter_mut()
            .find(|p| p.id == player.id)
            .ok_or(TournamentError::PlayerNotFound(player.id))?;
        player.statistics = std::mem::take(&mut stored.statistics);
        let moved_team = stored.team_id != player.team_id;
        let (id, old_team) = (stored.id, stored.team_id);
        *stored = player;
        if moved_team {
            self.clear_captaincy(old_team, id);
        }
        Ok(())
    }

    pub fn update_statistics(
        &mut self,
        id: PlayerId,
        statistics: PlayerStatistics,
    ) -> Result<(), TournamentError> {
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(TournamentError::PlayerNotFound(id))?;
        player.statistics = statistics;
        Ok(())
    }

    pub fn delete_player(&mut self, id: PlayerId) -> Result<Player, TournamentError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(TournamentError::PlayerNotFound(id))?;
        let player = self.players.remove(idx);
        self.clear_captaincy(player.team_id, id);
        Ok(player)
    }

    fn clear_captaincy(&mut self, team_id: TeamId, player_id: PlayerId) {
        if let Some(team) = self.teams.iter_mut().find(|t| t.id == team_id) {
            if team.captain_id == Some(player_id) {
                team.captain_id = None;
            }
        }
    }

    // Matches

    pub fn matches(&self) -> &[MatchSlot] {
        &self.matches
    }

    pub fn match_slot(&self, id: MatchId) -> Option<&MatchSlot> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn match_slot_mut(&mut self, id: MatchId) -> Option<&mut MatchSlot> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// All matches ordered by date, then time.
    pub fn matches_by_date(&self) -> Vec<&MatchSlot> {
        let mut matches: Vec<_> = self.matches.iter().collect();
        matches.sort_by(|a, b| {
            (a.match_date, &a.match_time).cmp(&(b.match_date, &b.match_time))
        });
        matches
    }

    pub fn matches_in_round(&self, round: Round) -> Vec<&MatchSlot> {
        self.matches_by_date()
            .into_iter()
            .filter(|m| m.round == round)
            .collect()
    }

    /// Replace a stored match, keeping its id. Participants are re-validated.
    /// A match set back to scheduled loses its result, so dependants stop
    /// resolving to the old winner.
    pub fn update_match(&mut self, mut slot: MatchSlot) -> Result<(), TournamentError> {
        if self.match_slot(slot.id).is_none() {
            return Err(TournamentError::MatchNotFound(slot.id));
        }
        self.check_participants(&slot)?;
        if slot.status == MatchStatus::Scheduled {
            slot.winner_id = None;
            slot.team_a_score = None;
            slot.team_b_score = None;
            slot.result_summary = None;
        }
        if let Some(stored) = self.match_slot_mut(slot.id) {
            *stored = slot;
        }
        Ok(())
    }

    /// Remove a match. Refused while a later match waits on its winner.
    pub fn delete_match(&mut self, id: MatchId) -> Result<MatchSlot, TournamentError> {
        let idx = self
            .matches
            .iter()
            .position(|m| m.id == id)
            .ok_or(TournamentError::MatchNotFound(id))?;
        if self.matches.iter().any(|m| m.depends_on(id)) {
            return Err(TournamentError::MatchHasDependants(id));
        }
        Ok(self.matches.remove(idx))
    }

    /// The team a participant currently stands for. `WinnerOf` resolves once
    /// the feeding match has a recorded winner.
    pub fn resolve(&self, participant: Participant) -> Option<TeamId> {
        match participant {
            Participant::Team(id) => Some(id),
            Participant::WinnerOf(id) => self.match_slot(id).and_then(|m| m.winner_id),
        }
    }

    fn participant_exists(&self, participant: Participant, own_id: MatchId) -> bool {
        match participant {
            Participant::Team(id) => self.team(id).is_some(),
            Participant::WinnerOf(id) => id != own_id && self.match_slot(id).is_some(),
        }
    }

    fn check_participants(&self, slot: &MatchSlot) -> Result<(), TournamentError> {
        let all_exist = slot
            .participants()
            .iter()
            .all(|&p| self.participant_exists(p, slot.id));
        if !all_exist {
            return Err(TournamentError::UnknownParticipant(slot.id));
        }
        Ok(())
    }

    // Settings

    pub fn settings(&self) -> &TournamentSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: TournamentSettings) {
        self.settings = settings;
    }
}

impl TeamDirectory for Tables {
    fn all_teams(&self) -> Vec<Team> {
        self.teams.clone()
    }
}

impl MatchStore for Tables {
    fn delete_all(&mut self) -> Result<usize, TournamentError> {
        let removed = self.matches.len();
        self.matches.clear();
        Ok(removed)
    }

    fn insert(&mut self, slot: MatchSlot) -> Result<MatchId, TournamentError> {
        if self.match_slot(slot.id).is_some() {
            return Err(TournamentError::DuplicateMatch(slot.id));
        }
        self.check_participants(&slot)?;
        let id = slot.id;
        self.matches.push(slot);
        Ok(id)
    }
}
