mod common;

use axum::http::{header, StatusCode};
use common::{days_from_now, read_body, TestApp};

fn musical_hop_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "The Musical Hop"),
        ("city", "San Francisco"),
        ("state", "CA"),
        ("address", "1015 Folsom Street"),
        ("phone", "123-123-1234"),
        ("genres", "Jazz"),
        ("genres", "Folk"),
        ("facebook_link", "https://www.facebook.com/TheMusicalHop"),
        ("website_link", "https://www.themusicalhop.com"),
        ("seeking_talent", "y"),
        ("seeking_description", "We are on the lookout for a local artist"),
    ]
}

#[tokio::test]
async fn test_create_venue_lists_it_under_its_area() {
    let app = TestApp::new().await;

    let res = app.post_form("/venues/create", &musical_hop_form()).await;
    let (status, body) = read_body(res).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Venue The Musical Hop was successfully listed!"));

    let venues = app.state.venue_repo.list().await.unwrap();
    assert_eq!(venues.len(), 1);
    assert_eq!(venues[0].genres.0, vec!["Jazz".to_string(), "Folk".to_string()]);
    assert!(venues[0].seeking_talent);

    let (status, body) = app.get("/venues").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("San Francisco, CA"));
    assert!(body.contains("The Musical Hop"));
}

#[tokio::test]
async fn test_areas_keep_first_seen_order() {
    let app = TestApp::new().await;
    app.seed_venue("The Musical Hop", "San Francisco", "CA").await;
    app.seed_venue("The Dueling Pianos Bar", "New York", "NY").await;
    app.seed_venue("Park Square Live Music and Coffee", "San Francisco", "CA").await;

    let (status, body) = app.get("/venues").await;
    assert_eq!(status, StatusCode::OK);

    let sf = body.find("San Francisco, CA").unwrap();
    let ny = body.find("New York, NY").unwrap();
    assert!(sf < ny);
    assert_eq!(body.matches("San Francisco, CA").count(), 1);

    let hop = body.find("The Musical Hop").unwrap();
    let park = body.find("Park Square Live Music and Coffee").unwrap();
    assert!(hop < park && park < ny);
}

#[tokio::test]
async fn test_venue_detail_splits_past_and_upcoming() {
    let app = TestApp::new().await;
    let venue = app.seed_venue("The Musical Hop", "San Francisco", "CA").await;
    let guns = app.seed_artist("Guns N Petals").await;
    let quevedo = app.seed_artist("Matt Quevedo").await;

    app.seed_show(guns.id, venue.id, days_from_now(-30)).await;
    app.seed_show(quevedo.id, venue.id, days_from_now(10)).await;
    app.seed_show(guns.id, venue.id, days_from_now(20)).await;

    let (status, body) = app.get(&format!("/venues/{}", venue.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("2 Upcoming Shows"));
    assert!(body.contains("1 Past Shows"));
    assert!(body.contains("Matt Quevedo"));
    assert!(body.contains("Not currently seeking talent"));

    let (_, listing) = app.get("/venues").await;
    assert!(listing.contains("2 upcoming"));
}

#[tokio::test]
async fn test_missing_venue_is_404() {
    let app = TestApp::new().await;

    let (status, _) = app.get("/venues/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/venues/999/edit").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete("/venues/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_integer_venue_id_is_404_page() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/venues/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("<h1>404 Not Found</h1>"));

    let (status, _) = app.get("/venues/1.5/edit").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let res = app.post_form("/venues/abc/edit", &musical_hop_form()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let (status, _) = app.delete("/venues/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_generic_failures_hide_specific_checks() {
    let app = TestApp::new().await;

    let mut form = musical_hop_form();
    form.retain(|(k, _)| *k != "name");
    form.retain(|(k, _)| *k != "phone");
    form.push(("phone", "not-a-phone"));

    let res = app.post_form("/venues/create", &form).await;
    let (status, body) = read_body(res).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("This field is required."));
    assert!(!body.contains("Invalid phone number."));

    assert!(app.state.venue_repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_specific_failures_are_all_reported() {
    let app = TestApp::new().await;

    let form = vec![
        ("name", "The Musical Hop"),
        ("city", "San Francisco"),
        ("state", "ZZ"),
        ("address", "1015 Folsom Street"),
        ("phone", "12"),
        ("genres", "Polka"),
    ];

    let res = app.post_form("/venues/create", &form).await;
    let (status, body) = read_body(res).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Invalid phone number."));
    assert!(body.contains("Invalid genres."));
    assert!(body.contains("Invalid state."));
    // Submitted values survive the re-render.
    assert!(body.contains("value=\"The Musical Hop\""));
}

#[tokio::test]
async fn test_invalid_url_rejected() {
    let app = TestApp::new().await;

    let mut form = musical_hop_form();
    form.retain(|(k, _)| *k != "website_link");
    form.push(("website_link", "themusicalhop"));

    let res = app.post_form("/venues/create", &form).await;
    let (status, body) = read_body(res).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Invalid URL."));
}

#[tokio::test]
async fn test_edit_venue_prefills_and_updates() {
    let app = TestApp::new().await;
    let venue = app.seed_venue("The Musical Hop", "San Francisco", "CA").await;

    let (status, body) = app.get(&format!("/venues/{}/edit", venue.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("value=\"The Musical Hop\""));
    assert!(body.contains("<option value=\"Jazz\" selected>"));

    let mut form = musical_hop_form();
    form.retain(|(k, _)| *k != "name" && *k != "seeking_talent");
    form.push(("name", "The Musical Hop Annex"));

    let res = app.post_form(&format!("/venues/{}/edit", venue.id), &form).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        res.headers().get(header::LOCATION).unwrap(),
        &format!("/venues/{}", venue.id)
    );

    let updated = app.state.venue_repo.find_by_id(venue.id).await.unwrap().unwrap();
    assert_eq!(updated.name, "The Musical Hop Annex");
    assert!(!updated.seeking_talent);
}

#[tokio::test]
async fn test_invalid_edit_leaves_venue_unchanged() {
    let app = TestApp::new().await;
    let venue = app.seed_venue("The Musical Hop", "San Francisco", "CA").await;

    let res = app.post_form(
        &format!("/venues/{}/edit", venue.id),
        &[("name", ""), ("city", "San Francisco"), ("state", "CA"), ("address", "x"), ("genres", "Jazz")],
    ).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let stored = app.state.venue_repo.find_by_id(venue.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "The Musical Hop");
}

#[tokio::test]
async fn test_search_venues_is_partial_and_case_insensitive() {
    let app = TestApp::new().await;
    let hop = app.seed_venue("The Musical Hop", "San Francisco", "CA").await;
    app.seed_venue("Park Square Live Music and Coffee", "San Francisco", "CA").await;
    app.seed_venue("The Dueling Pianos Bar", "New York", "NY").await;
    let artist = app.seed_artist("Guns N Petals").await;
    app.seed_show(artist.id, hop.id, days_from_now(5)).await;

    let res = app.post_form("/venues/search", &[("search_term", "Hop")]).await;
    let (status, body) = read_body(res).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Number of search results for \"Hop\": 1"));
    assert!(body.contains("1 upcoming"));

    let res = app.post_form("/venues/search", &[("search_term", "music")]).await;
    let (_, body) = read_body(res).await;
    assert!(body.contains("Number of search results for \"music\": 2"));

    let res = app.post_form("/venues/search", &[("search_term", "100%")]).await;
    let (_, body) = read_body(res).await;
    assert!(body.contains(": 0"));
}

#[tokio::test]
async fn test_search_folds_non_ascii_case() {
    let app = TestApp::new().await;
    app.seed_venue("CAFÉ BLEU", "San Francisco", "CA").await;
    app.seed_venue("Cafe Noir", "San Francisco", "CA").await;

    let res = app.post_form("/venues/search", &[("search_term", "café")]).await;
    let (status, body) = read_body(res).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(": 1"));
    assert!(body.contains("CAFÉ BLEU"));
    assert!(!body.contains("Cafe Noir"));
}

#[tokio::test]
async fn test_long_text_fields_are_stored_whole() {
    let app = TestApp::new().await;
    let city = "San Francisco ".repeat(20);
    let address = format!("{} Folsom Street", "1015 ".repeat(60));
    let website = format!("https://www.themusicalhop.com/{}", "a".repeat(600));

    let mut form: Vec<(&str, &str)> = musical_hop_form()
        .into_iter()
        .filter(|(k, _)| !matches!(*k, "city" | "address" | "website_link"))
        .collect();
    form.push(("city", city.trim()));
    form.push(("address", &address));
    form.push(("website_link", &website));

    let res = app.post_form("/venues/create", &form).await;
    let (status, _) = read_body(res).await;
    assert_eq!(status, StatusCode::OK);

    let venues = app.state.venue_repo.list().await.unwrap();
    assert_eq!(venues[0].city, city.trim());
    assert_eq!(venues[0].address, address);
    assert_eq!(venues[0].website_link.as_deref(), Some(website.as_str()));
}

#[tokio::test]
async fn test_delete_venue_removes_its_shows() {
    let app = TestApp::new().await;
    let venue = app.seed_venue("The Musical Hop", "San Francisco", "CA").await;
    let other = app.seed_venue("The Dueling Pianos Bar", "New York", "NY").await;
    let artist = app.seed_artist("Guns N Petals").await;
    app.seed_show(artist.id, venue.id, days_from_now(3)).await;
    app.seed_show(artist.id, other.id, days_from_now(4)).await;

    let (status, body) = app.delete(&format!("/venues/{}", venue.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("deleted"));

    let (status, _) = app.get(&format!("/venues/{}", venue.id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let shows = app.state.show_repo.list().await.unwrap();
    assert_eq!(shows.len(), 1);
    assert_eq!(shows[0].venue_id, other.id);
    assert!(app.state.artist_repo.find_by_id(artist.id).await.unwrap().is_some());
}
