mod common;

use cars_core::model::now_millis;
use cars_core::{
    BrandRepository, Participates, ParticipatesRepository, Photo, PhotoRepository, Post, PostRepository,
    PriceHistory, PriceHistoryRepository, RepoError,
};
use chrono::{Duration, Utc};
use common::{brand, car, post, repos, seller_with_bmw, user};

#[test]
fn save_post_keeps_creation_time_at_millisecond_precision() {
    let repos = repos();
    let (user_id, car_id) = seller_with_bmw(&repos);
    let created = now_millis() - Duration::hours(3);

    let mut ad = Post::new("clean title", user_id, car_id).created_at(created);
    let id = repos.posts.save_post(&mut ad).unwrap();

    let loaded = repos.posts.get_post_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.description, "clean title");
    assert_eq!(loaded.created, created);
    assert_eq!(loaded.user_id, user_id);
    assert_eq!(loaded.car_id, car_id);
}

#[test]
fn post_for_missing_car_is_a_constraint_violation() {
    let repos = repos();
    let user_id = user(&repos, "seller");

    let err = repos
        .posts
        .save_post(&mut Post::new("no car", user_id, 77))
        .unwrap_err();

    assert!(err.is_constraint_violation());
    assert!(repos.posts.get_all_posts().unwrap().is_empty());
}

#[test]
fn get_all_posts_is_ordered_by_id() {
    let repos = repos();
    let (user_id, car_id) = seller_with_bmw(&repos);
    let first = post(&repos, "first", user_id, car_id);
    let second = post(&repos, "second", user_id, car_id);

    let ids: Vec<_> = repos
        .posts
        .get_all_posts()
        .unwrap()
        .into_iter()
        .map(|post| post.id)
        .collect();
    assert_eq!(ids, vec![Some(first), Some(second)]);
}

#[test]
fn last_day_window_keeps_recent_posts_only() {
    let repos = repos();
    let (user_id, car_id) = seller_with_bmw(&repos);

    let mut recent = Post::new("recent", user_id, car_id).created_at(Utc::now() - Duration::hours(5));
    let mut stale = Post::new("stale", user_id, car_id).created_at(Utc::now() - Duration::days(2));
    repos.posts.save_post(&mut recent).unwrap();
    repos.posts.save_post(&mut stale).unwrap();

    let last_day = repos.posts.get_all_posts_for_last_day().unwrap();

    assert_eq!(last_day, vec![recent]);
}

#[test]
fn posts_since_uses_inclusive_lower_bound() {
    let repos = repos();
    let (user_id, car_id) = seller_with_bmw(&repos);
    let boundary = now_millis() - Duration::hours(1);

    let mut at_boundary = Post::new("edge", user_id, car_id).created_at(boundary);
    repos.posts.save_post(&mut at_boundary).unwrap();

    assert_eq!(repos.posts.get_all_posts_since(boundary).unwrap(), vec![at_boundary]);
    assert!(repos
        .posts
        .get_all_posts_since(boundary + Duration::milliseconds(1))
        .unwrap()
        .is_empty());
}

#[test]
fn with_photo_returns_only_posts_that_have_photos() {
    let repos = repos();
    let (user_id, car_id) = seller_with_bmw(&repos);
    let bare = post(&repos, "no photos", user_id, car_id);
    let illustrated = post(&repos, "two photos", user_id, car_id);
    repos.photos.save_photo(&mut Photo::new("/img/front.jpg", illustrated)).unwrap();
    repos.photos.save_photo(&mut Photo::new("/img/back.jpg", illustrated)).unwrap();

    let with_photo = repos.posts.get_all_posts_with_photo().unwrap();

    assert_eq!(with_photo.len(), 1);
    assert_eq!(with_photo[0].id, Some(illustrated));
    assert_ne!(with_photo[0].id, Some(bare));
}

#[test]
fn specific_brand_filter_is_exact_and_newest_first() {
    let repos = repos();
    let (user_id, bmw_car) = seller_with_bmw(&repos);
    let audi = brand(&repos, "AUDI");
    let audi_car = car(&repos, "A6", audi);
    let bmw = repos.brands.get_brand_by_name("BMW").unwrap().unwrap();
    let bmw_car_two = car(&repos, "X3", bmw.id.unwrap());

    let older = post(&repos, "x5", user_id, bmw_car);
    post(&repos, "a6", user_id, audi_car);
    let newer = post(&repos, "x3", user_id, bmw_car_two);

    let ids: Vec<_> = repos
        .posts
        .get_all_posts_with_specific_car_brand("BMW")
        .unwrap()
        .into_iter()
        .map(|post| post.id)
        .collect();
    assert_eq!(ids, vec![Some(newer), Some(older)]);

    assert!(repos
        .posts
        .get_all_posts_with_specific_car_brand("bmw")
        .unwrap()
        .is_empty());
    assert!(repos
        .posts
        .get_all_posts_with_specific_car_brand("Lada")
        .unwrap()
        .is_empty());
}

#[test]
fn posts_by_user_lists_only_that_author() {
    let repos = repos();
    let (seller, car_id) = seller_with_bmw(&repos);
    let other = user(&repos, "other");
    let mine = post(&repos, "mine", seller, car_id);
    post(&repos, "theirs", other, car_id);

    let posts = repos.posts.get_posts_by_user(seller).unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, Some(mine));
}

#[test]
fn update_rewrites_description_but_not_creation_time() {
    let repos = repos();
    let (user_id, car_id) = seller_with_bmw(&repos);
    let id = post(&repos, "draft", user_id, car_id);
    let original = repos.posts.get_post_by_id(id).unwrap().unwrap();

    let mut edited = original.clone();
    edited.description = "final".to_string();
    edited.created = Utc::now() - Duration::days(30);
    repos.posts.update_post(&edited).unwrap();

    let loaded = repos.posts.get_post_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.description, "final");
    assert_eq!(loaded.created, original.created);
}

#[test]
fn update_and_delete_of_missing_post_are_not_found() {
    let repos = repos();
    let (user_id, car_id) = seller_with_bmw(&repos);

    let mut ghost = Post::new("ghost", user_id, car_id);
    ghost.id = Some(404);
    assert!(matches!(
        repos.posts.update_post(&ghost).unwrap_err(),
        RepoError::NotFound { entity: "post", id: 404 }
    ));
    assert!(repos.posts.delete_post_by_id(404).unwrap_err().is_not_found());
    assert!(matches!(
        repos.posts.update_post(&Post::new("unsaved", user_id, car_id)).unwrap_err(),
        RepoError::Unsaved { entity: "post" }
    ));
}

#[test]
fn deleting_post_cascades_to_owned_rows() {
    let repos = repos();
    let (user_id, car_id) = seller_with_bmw(&repos);
    let follower = user(&repos, "follower");
    let id = post(&repos, "bundle", user_id, car_id);
    let keep = post(&repos, "keep", user_id, car_id);

    repos.photos.save_photo(&mut Photo::new("/img/1.jpg", id)).unwrap();
    repos.photos.save_photo(&mut Photo::new("/img/keep.jpg", keep)).unwrap();
    repos
        .price_history
        .save_price_history(&mut PriceHistory::new(id, 10_000, 9_500))
        .unwrap();
    repos
        .participates
        .save_participates(&mut Participates::new(follower, id))
        .unwrap();

    repos.posts.delete_post_by_id(id).unwrap();

    assert!(repos.posts.get_post_by_id(id).unwrap().is_none());
    assert!(repos.photos.get_photos_by_post(id).unwrap().is_empty());
    assert!(repos.price_history.get_price_history_by_post(id).unwrap().is_empty());
    assert!(repos.participates.get_subscribers_of_post(id).unwrap().is_empty());
    assert_eq!(repos.photos.get_photos_by_post(keep).unwrap().len(), 1);
}
