use super::*;

const SPRING_OPEN: &str = r#"
{
  "tournament": { "name": "Spring Open", "date": "2024-05-01", "websiteUrl": "https://example.com" },
  "players": [
    { "name": "Ada", "score": 54, "imageUrl": "", "isTeamMember": false },
    { "name": "Bo", "score": 50, "imageUrl": "", "isTeamMember": true },
    { "name": "Cy", "score": 47 }
  ]
}
"#;

#[test]
fn parses_camel_case_and_defaults() {
    let req = PodiumRenderRequest::from_json_str(SPRING_OPEN).unwrap();
    assert_eq!(req.tournament.website_url, "https://example.com");
    assert_eq!(req.players.len(), 3);
    assert!(req.players[1].is_team_member);
    assert_eq!(req.players[2].image_url, "");
    assert!(!req.players[2].is_team_member);
    req.check_render_contract().unwrap();
    req.validate().unwrap();
}

#[test]
fn non_numeric_score_is_a_serde_error() {
    let bad = SPRING_OPEN.replace("\"score\": 54", "\"score\": \"lots\"");
    let err = PodiumRenderRequest::from_json_str(&bad).unwrap_err();
    assert!(matches!(err, PodiumError::Serde(_)));
}

#[test]
fn render_contract_rejects_two_players() {
    let mut req = PodiumRenderRequest::from_json_str(SPRING_OPEN).unwrap();
    req.players.pop();
    let err = req.check_render_contract().unwrap_err();
    assert!(err.to_string().contains("exactly 3 players, got 2"));
}

#[test]
fn render_contract_rejects_blank_header_field() {
    let mut req = PodiumRenderRequest::from_json_str(SPRING_OPEN).unwrap();
    req.tournament.website_url = "  ".to_string();
    let err = req.check_render_contract().unwrap_err();
    assert!(err.to_string().contains("tournament.websiteUrl"));
}

#[test]
fn image_locators_follow_rank_order() {
    let mut req = PodiumRenderRequest::from_json_str(SPRING_OPEN).unwrap();
    req.players[0].image_url = "a.png".to_string();
    req.players[2].image_url = "c.png".to_string();
    let locators: Vec<&str> = req.image_locators().collect();
    assert_eq!(locators, vec!["a.png", "", "c.png"]);
}
