mod common;

use cars_core::{
    Brand, BrandRepository, Car, CarRepository, Engine, EngineRepository, RepoError,
};
use common::{brand, car, post, repos, seller_with_bmw};

#[test]
fn brand_lifecycle_save_rename_delete() {
    let repos = repos();

    let mut bmw = Brand::new("BMW");
    let id = repos.brands.save_brand(&mut bmw).unwrap();
    assert_eq!(bmw.id, Some(id));

    let loaded = repos.brands.get_brand_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.name, "BMW");

    bmw.name = "AUDI".to_string();
    repos.brands.update_brand(&bmw).unwrap();
    let renamed = repos.brands.get_brand_by_id(id).unwrap().unwrap();
    assert_eq!(renamed.name, "AUDI");
    assert!(repos.brands.get_brand_by_name("BMW").unwrap().is_none());
    assert_eq!(repos.brands.get_brand_by_name("AUDI").unwrap(), Some(bmw));

    repos.brands.delete_brand_by_id(id).unwrap();
    assert!(repos.brands.get_brand_by_id(id).unwrap().is_none());
    assert!(repos.brands.get_all_brands().unwrap().is_empty());
}

#[test]
fn get_all_brands_lists_every_saved_brand() {
    let repos = repos();
    brand(&repos, "BMW");
    brand(&repos, "Lada");

    let names: Vec<String> = repos
        .brands
        .get_all_brands()
        .unwrap()
        .into_iter()
        .map(|brand| brand.name)
        .collect();
    assert_eq!(names, vec!["BMW".to_string(), "Lada".to_string()]);
}

#[test]
fn duplicate_brand_name_is_a_constraint_violation() {
    let repos = repos();
    brand(&repos, "BMW");

    let mut duplicate = Brand::new("BMW");
    let err = repos.brands.save_brand(&mut duplicate).unwrap_err();

    assert!(err.is_constraint_violation());
    assert!(duplicate.id.is_none());
    assert_eq!(repos.brands.get_all_brands().unwrap().len(), 1);
}

#[test]
fn update_of_unsaved_brand_is_rejected() {
    let repos = repos();
    let err = repos.brands.update_brand(&Brand::new("ghost")).unwrap_err();
    assert!(matches!(err, RepoError::Unsaved { entity: "brand" }));
}

#[test]
fn delete_of_missing_brand_is_not_found() {
    let repos = repos();
    let err = repos.brands.delete_brand_by_id(99).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "brand", id: 99 }));
}

#[test]
fn brand_referenced_by_car_cannot_be_deleted() {
    let repos = repos();
    let brand_id = brand(&repos, "BMW");
    car(&repos, "X5", brand_id);

    let err = repos.brands.delete_brand_by_id(brand_id).unwrap_err();

    assert!(err.is_constraint_violation());
    assert!(repos.brands.get_brand_by_id(brand_id).unwrap().is_some());
}

#[test]
fn engine_crud_round() {
    let repos = repos();

    let mut engine = Engine::new("V8");
    let id = repos.engines.save_engine(&mut engine).unwrap();
    assert_eq!(repos.engines.get_engine_by_id(id).unwrap().unwrap().name, "V8");

    engine.name = "V12".to_string();
    repos.engines.update_engine(&engine).unwrap();
    assert_eq!(repos.engines.get_all_engines().unwrap()[0].name, "V12");

    repos.engines.delete_engine_by_id(id).unwrap();
    assert!(repos.engines.get_engine_by_id(id).unwrap().is_none());
}

#[test]
fn car_with_missing_brand_is_a_constraint_violation() {
    let repos = repos();

    let mut orphan = Car::new("Phantom", 404);
    let err = repos.cars.save_car(&mut orphan).unwrap_err();

    assert!(err.is_constraint_violation());
    assert!(repos.cars.get_all_cars().unwrap().is_empty());
}

#[test]
fn car_keeps_brand_and_engine_references() {
    let repos = repos();
    let brand_id = brand(&repos, "BMW");
    let engine_id = repos.engines.save_engine(&mut Engine::new("N57")).unwrap();

    let mut x5 = Car::new("X5", brand_id).with_engine(engine_id);
    let id = repos.cars.save_car(&mut x5).unwrap();

    let loaded = repos.cars.get_car_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.brand_id, brand_id);
    assert_eq!(loaded.engine_id, Some(engine_id));
}

#[test]
fn engine_cannot_power_two_cars() {
    let repos = repos();
    let brand_id = brand(&repos, "BMW");
    let engine_id = repos.engines.save_engine(&mut Engine::new("N57")).unwrap();
    repos
        .cars
        .save_car(&mut Car::new("X5", brand_id).with_engine(engine_id))
        .unwrap();

    let err = repos
        .cars
        .save_car(&mut Car::new("X6", brand_id).with_engine(engine_id))
        .unwrap_err();

    assert!(err.is_constraint_violation());
}

#[test]
fn update_of_missing_car_is_not_found_and_changes_nothing() {
    let repos = repos();
    let brand_id = brand(&repos, "BMW");
    let existing = car(&repos, "X5", brand_id);

    let mut ghost = Car::new("ghost", brand_id);
    ghost.id = Some(existing + 100);
    let err = repos.cars.update_car(&ghost).unwrap_err();

    assert!(err.is_not_found());
    let cars = repos.cars.get_all_cars().unwrap();
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0].name, "X5");
}

#[test]
fn deleting_car_removes_its_engine() {
    let repos = repos();
    let brand_id = brand(&repos, "BMW");
    let engine_id = repos.engines.save_engine(&mut Engine::new("N57")).unwrap();
    let car_id = repos
        .cars
        .save_car(&mut Car::new("X5", brand_id).with_engine(engine_id))
        .unwrap();

    repos.cars.delete_car_by_id(car_id).unwrap();

    assert!(repos.cars.get_car_by_id(car_id).unwrap().is_none());
    assert!(repos.engines.get_engine_by_id(engine_id).unwrap().is_none());
}

#[test]
fn deleting_missing_car_is_not_found() {
    let repos = repos();
    let err = repos.cars.delete_car_by_id(7).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "car", id: 7 }));
}

#[test]
fn engine_in_use_cannot_be_deleted() {
    let repos = repos();
    let brand_id = brand(&repos, "BMW");
    let engine_id = repos.engines.save_engine(&mut Engine::new("N57")).unwrap();
    repos
        .cars
        .save_car(&mut Car::new("X5", brand_id).with_engine(engine_id))
        .unwrap();

    let err = repos.engines.delete_engine_by_id(engine_id).unwrap_err();

    assert!(err.is_constraint_violation());
    assert!(repos.engines.get_engine_by_id(engine_id).unwrap().is_some());
}

#[test]
fn car_with_posts_cannot_be_deleted_and_engine_survives() {
    let repos = repos();
    let (user_id, _) = seller_with_bmw(&repos);
    let brand_id = repos.brands.get_brand_by_name("BMW").unwrap().unwrap().id.unwrap();
    let engine_id = repos.engines.save_engine(&mut Engine::new("B58")).unwrap();
    let car_id = repos
        .cars
        .save_car(&mut Car::new("M340i", brand_id).with_engine(engine_id))
        .unwrap();
    post(&repos, "selling", user_id, car_id);

    let err = repos.cars.delete_car_by_id(car_id).unwrap_err();

    assert!(err.is_constraint_violation());
    assert!(repos.cars.get_car_by_id(car_id).unwrap().is_some());
    assert!(repos.engines.get_engine_by_id(engine_id).unwrap().is_some());
}
