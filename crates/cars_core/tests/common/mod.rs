#![allow(dead_code)]

use cars_core::{
    Brand, BrandId, BrandRepository, Car, CarId, CarRepository, Database, Post, PostId,
    PostRepository, Repositories, User, UserId, UserRepository,
};
use std::sync::Arc;

pub fn repos() -> Repositories {
    Repositories::new(Arc::new(Database::open_in_memory().unwrap()))
}

pub fn user(repos: &Repositories, login: &str) -> UserId {
    repos.users.create(&mut User::new(login, "secret")).unwrap()
}

pub fn brand(repos: &Repositories, name: &str) -> BrandId {
    repos.brands.save_brand(&mut Brand::new(name)).unwrap()
}

pub fn car(repos: &Repositories, name: &str, brand_id: BrandId) -> CarId {
    repos.cars.save_car(&mut Car::new(name, brand_id)).unwrap()
}

pub fn post(repos: &Repositories, description: &str, user_id: UserId, car_id: CarId) -> PostId {
    repos
        .posts
        .save_post(&mut Post::new(description, user_id, car_id))
        .unwrap()
}

/// Seeds one user, one "BMW" car and returns `(user_id, car_id)`.
pub fn seller_with_bmw(repos: &Repositories) -> (UserId, CarId) {
    let user_id = user(repos, "seller");
    let brand_id = brand(repos, "BMW");
    let car_id = car(repos, "X5", brand_id);
    (user_id, car_id)
}
