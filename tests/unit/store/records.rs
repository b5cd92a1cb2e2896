use super::*;

fn form() -> PodiumRenderRequest {
    PodiumRenderRequest::from_json_str(
        r#"{
          "tournament": { "name": "Spring Open", "date": "2024-05-01", "websiteUrl": "example.com" },
          "players": [
            { "name": "Ada", "score": 54, "imageUrl": "/uploads/1-ada.png" },
            { "name": "Bo", "score": 50, "imageUrl": "" },
            { "name": "Cy", "score": 47, "imageUrl": "" }
          ]
        }"#,
    )
    .unwrap()
}

#[test]
fn ids_auto_increment_per_table() {
    let store = MemRecordStore::new();
    let first = submit_podium(&store, &form()).unwrap();
    assert_eq!(first.tournament.id, 1);
    assert_eq!(
        first.players.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    let second = submit_podium(&store, &form()).unwrap();
    assert_eq!(second.tournament.id, 2);
    assert_eq!(second.players[0].id, 4);
}

#[test]
fn records_are_retrievable_and_places_unset() {
    let store = MemRecordStore::new();
    let out = submit_podium(&store, &form()).unwrap();

    let t = store.get_tournament(out.tournament.id).unwrap().unwrap();
    assert_eq!(t.name, "Spring Open");
    assert_eq!(t.first_place_id, None);
    assert_eq!(t.second_place_id, None);
    assert_eq!(t.third_place_id, None);

    let ada = store.get_player(1).unwrap().unwrap();
    assert_eq!(ada.image_url, "/uploads/1-ada.png");
    assert_eq!(ada.score, 54);
    assert!(store.get_player(99).unwrap().is_none());
    assert!(store.get_tournament(0).unwrap().is_none());
}

#[test]
fn invalid_form_stores_nothing() {
    let store = MemRecordStore::new();
    let mut req = form();
    req.players[2].name.clear();
    assert!(submit_podium(&store, &req).is_err());
    assert!(store.get_tournament(1).unwrap().is_none());
    assert!(store.get_player(1).unwrap().is_none());
}

#[test]
fn serializes_camel_case_with_null_places() {
    let store = MemRecordStore::new();
    let out = submit_podium(&store, &form()).unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["tournament"]["websiteUrl"], "example.com");
    assert!(json["tournament"]["firstPlaceId"].is_null());
    assert_eq!(json["players"][0]["imageUrl"], "/uploads/1-ada.png");
}
