//! Service tests against a real database

use biblioteca_server::{
    models::{AuthorRequest, BookRequest, LoanRequest, UserRequest},
    repository::Repository,
    services::Services,
    AppError,
};
use sqlx::PgPool;

fn services(pool: PgPool) -> Services {
    Services::new(Repository::new(pool))
}

fn book(title: &str, author_id: i64, category: &str, available_count: i32) -> BookRequest {
    BookRequest {
        title: title.to_string(),
        author_id,
        category: category.to_string(),
        available_count,
    }
}

async fn author(services: &Services, name: &str) -> i64 {
    services
        .authors
        .create_author(AuthorRequest { name: name.to_string() })
        .await
        .unwrap()
        .id
}

async fn user(services: &Services, name: &str, email: &str) -> i64 {
    services
        .users
        .create_user(UserRequest {
            name: name.to_string(),
            email: email.to_string(),
        })
        .await
        .unwrap()
        .id
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn create_book_with_unknown_author_is_bad_request(pool: PgPool) {
    let services = services(pool);

    let result = services.books.create_book(book("Huérfano", 999_999, "Novela", 1)).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert!(services.books.list_books().await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn create_then_get_round_trips(pool: PgPool) {
    let services = services(pool);
    let author_id = author(&services, "Jorge Luis Borges").await;

    let created = services
        .books
        .create_book(book("Ficciones", author_id, "Cuentos", 4))
        .await
        .unwrap();
    let fetched = services.books.get_book(created.id).await.unwrap();

    assert_eq!(created, fetched);
    assert_eq!(fetched.title, "Ficciones");
    assert_eq!(fetched.author.id, author_id);
    assert_eq!(fetched.author.name, "Jorge Luis Borges");
    assert_eq!(fetched.category, "Cuentos");
    assert_eq!(fetched.available_count, 4);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn deleted_book_is_not_found(pool: PgPool) {
    let services = services(pool);
    let author_id = author(&services, "Julio Cortázar").await;
    let created = services
        .books
        .create_book(book("Rayuela", author_id, "Novela", 1))
        .await
        .unwrap();

    services.books.delete_book(created.id).await.unwrap();

    assert!(matches!(
        services.books.get_book(created.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        services.books.delete_book(created.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn update_replaces_every_field(pool: PgPool) {
    let services = services(pool);
    let first = author(&services, "Pablo Neruda").await;
    let second = author(&services, "Gabriela Mistral").await;
    let created = services
        .books
        .create_book(book("Borrador", first, "Poesía", 1))
        .await
        .unwrap();

    let updated = services
        .books
        .update_book(created.id, book("Desolación", second, "Poesía chilena", 7))
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Desolación");
    assert_eq!(updated.author.name, "Gabriela Mistral");
    assert_eq!(updated.category, "Poesía chilena");
    assert_eq!(updated.available_count, 7);
    assert_eq!(services.books.get_book(created.id).await.unwrap(), updated);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn update_distinguishes_missing_book_from_missing_author(pool: PgPool) {
    let services = services(pool);
    let author_id = author(&services, "Octavio Paz").await;
    let created = services
        .books
        .create_book(book("El laberinto de la soledad", author_id, "Ensayo", 2))
        .await
        .unwrap();

    assert!(matches!(
        services.books.update_book(424_242, book("X", author_id, "Ensayo", 1)).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        services.books.update_book(created.id, book("X", 424_242, "Ensayo", 1)).await,
        Err(AppError::BadRequest(_))
    ));
    assert_eq!(
        services.books.get_book(created.id).await.unwrap().title,
        "El laberinto de la soledad"
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn category_listing_is_exact(pool: PgPool) {
    let services = services(pool);
    let author_id = author(&services, "Mario Vargas Llosa").await;

    let novela_a = services
        .books
        .create_book(book("La ciudad y los perros", author_id, "Novela", 1))
        .await
        .unwrap();
    services
        .books
        .create_book(book("Cartas a un joven novelista", author_id, "Ensayo", 1))
        .await
        .unwrap();
    services
        .books
        .create_book(book("Otra", author_id, "novela", 1))
        .await
        .unwrap();
    services
        .books
        .create_book(book("Otra más", author_id, "Novela histórica", 1))
        .await
        .unwrap();
    let novela_b = services
        .books
        .create_book(book("Conversación en La Catedral", author_id, "Novela", 1))
        .await
        .unwrap();

    let ids: Vec<i64> = services
        .books
        .list_books_by_category("Novela")
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.id)
        .collect();

    assert_eq!(ids, vec![novela_a.id, novela_b.id]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn author_name_listing_is_exact(pool: PgPool) {
    let services = services(pool);
    let allende = author(&services, "Isabel Allende").await;
    let other = author(&services, "Isabel").await;

    let mine = services
        .books
        .create_book(book("La casa de los espíritus", allende, "Novela", 2))
        .await
        .unwrap();
    services
        .books
        .create_book(book("Anónimo", other, "Novela", 2))
        .await
        .unwrap();

    let books = services.books.list_books_by_author_name("Isabel Allende").await.unwrap();
    assert_eq!(books, vec![mine]);
    assert!(services.books.list_books_by_author_name("isabel allende").await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn deleting_author_removes_their_books(pool: PgPool) {
    let services = services(pool);
    let author_id = author(&services, "Juan Rulfo").await;
    let created = services
        .books
        .create_book(book("Pedro Páramo", author_id, "Novela", 3))
        .await
        .unwrap();

    services.authors.delete_author(author_id).await.unwrap();

    assert!(matches!(services.authors.get_author(author_id).await, Err(AppError::NotFound(_))));
    assert!(matches!(services.books.get_book(created.id).await, Err(AppError::NotFound(_))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn author_lookup_by_name(pool: PgPool) {
    let services = services(pool);
    let id = author(&services, "Rubén Darío").await;

    assert_eq!(services.authors.get_author_by_name("Rubén Darío").await.unwrap().id, id);
    assert!(matches!(
        services.authors.get_author_by_name("Ruben Dario").await,
        Err(AppError::NotFound(_))
    ));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn duplicate_email_conflicts(pool: PgPool) {
    let services = services(pool);
    let ana = user(&services, "Ana", "ana@example.com").await;
    let luis = user(&services, "Luis", "luis@example.com").await;

    let duplicate = services
        .users
        .create_user(UserRequest {
            name: "Otra Ana".to_string(),
            email: "ana@example.com".to_string(),
        })
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let stolen = services
        .users
        .update_user(
            luis,
            UserRequest {
                name: "Luis".to_string(),
                email: "ana@example.com".to_string(),
            },
        )
        .await;
    assert!(matches!(stolen, Err(AppError::Conflict(_))));

    // Keeping one's own email is not a conflict
    let renamed = services
        .users
        .update_user(
            ana,
            UserRequest {
                name: "Ana María".to_string(),
                email: "ana@example.com".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Ana María");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn concurrent_creates_with_same_email_conflict(pool: PgPool) {
    let services = services(pool);

    for round in 0..10 {
        let email = format!("carrera{}@example.com", round);
        let request = |name: &str| UserRequest {
            name: name.to_string(),
            email: email.clone(),
        };

        let (first, second) = tokio::join!(
            services.users.create_user(request("Primera")),
            services.users.create_user(request("Segunda")),
        );

        let outcomes = [first, second];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1, "round {}", round);
        assert!(
            outcomes
                .iter()
                .any(|r| matches!(r, Err(AppError::Conflict(_)))),
            "round {}: {:?}",
            round,
            outcomes.iter().find(|r| r.is_err())
        );
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn book_write_with_deleted_author_is_bad_request(pool: PgPool) {
    let services = services(pool.clone());
    let author_id = author(&services, "Ernesto Sabato").await;
    let created = services
        .books
        .create_book(book("El túnel", author_id, "Novela", 1))
        .await
        .unwrap();

    // Author gone between the service's lookup and the write
    let repository = Repository::new(pool);
    let mut tx = repository.begin().await.unwrap();
    repository.authors.delete(&mut *tx, author_id).await.unwrap();
    tx.commit().await.unwrap();

    let mut tx = repository.begin().await.unwrap();
    let inserted = repository
        .books
        .insert(&mut *tx, &book("Sobre héroes y tumbas", author_id, "Novela", 1))
        .await;
    assert!(matches!(inserted, Err(AppError::BadRequest(_))));
    drop(tx);

    let other = author(&services, "Otro").await;
    let orphan = services
        .books
        .create_book(book("Abaddón", other, "Novela", 1))
        .await
        .unwrap();
    let mut tx = repository.begin().await.unwrap();
    let updated = repository
        .books
        .update(&mut *tx, orphan.id, &book("Abaddón", author_id, "Novela", 1))
        .await;
    assert!(matches!(updated, Err(AppError::BadRequest(_))));
    drop(tx);

    assert!(matches!(services.books.get_book(created.id).await, Err(AppError::NotFound(_))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn loan_lifecycle_tracks_available_copies(pool: PgPool) {
    let services = services(pool);
    let author_id = author(&services, "Miguel de Cervantes").await;
    let user_id = user(&services, "Sancho", "sancho@example.com").await;
    let quijote = services
        .books
        .create_book(book("Don Quijote", author_id, "Novela", 1))
        .await
        .unwrap();

    let loan = services
        .loans
        .create_loan(LoanRequest {
            user_id,
            book_id: quijote.id,
        })
        .await
        .unwrap();
    assert_eq!(loan.user.id, user_id);
    assert_eq!(loan.book.title, "Don Quijote");
    assert!(loan.return_date.is_none());
    assert_eq!(services.books.get_book(quijote.id).await.unwrap().available_count, 0);

    // No copy left
    let second = services
        .loans
        .create_loan(LoanRequest {
            user_id,
            book_id: quijote.id,
        })
        .await;
    assert!(matches!(second, Err(AppError::BadRequest(_))));

    let outstanding = services.loans.list_outstanding_loans().await.unwrap();
    assert_eq!(outstanding.len(), 1);

    let returned = services.loans.return_loan(loan.id).await.unwrap();
    assert!(returned.return_date.is_some());
    assert!(returned.return_date.unwrap() >= returned.loan_date);
    assert_eq!(services.books.get_book(quijote.id).await.unwrap().available_count, 1);
    assert!(services.loans.list_outstanding_loans().await.unwrap().is_empty());

    assert!(matches!(
        services.loans.return_loan(loan.id).await,
        Err(AppError::BadRequest(_))
    ));

    assert_eq!(services.loans.list_user_loans(user_id).await.unwrap().len(), 1);
    assert_eq!(services.loans.list_book_loans(quijote.id).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn loan_requires_existing_user_and_book(pool: PgPool) {
    let services = services(pool);
    let author_id = author(&services, "Horacio Quiroga").await;
    let user_id = user(&services, "Lector", "lector@example.com").await;
    let created = services
        .books
        .create_book(book("Cuentos de la selva", author_id, "Cuentos", 2))
        .await
        .unwrap();

    assert!(matches!(
        services.loans.create_loan(LoanRequest { user_id: 777_777, book_id: created.id }).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        services.loans.create_loan(LoanRequest { user_id, book_id: 777_777 }).await,
        Err(AppError::BadRequest(_))
    ));
    assert_eq!(services.books.get_book(created.id).await.unwrap().available_count, 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn deleting_outstanding_loan_restocks(pool: PgPool) {
    let services = services(pool);
    let author_id = author(&services, "Alfonsina Storni").await;
    let user_id = user(&services, "Lectora", "lectora@example.com").await;
    let created = services
        .books
        .create_book(book("Ocre", author_id, "Poesía", 1))
        .await
        .unwrap();
    let loan = services
        .loans
        .create_loan(LoanRequest { user_id, book_id: created.id })
        .await
        .unwrap();

    services.loans.delete_loan(loan.id).await.unwrap();

    assert_eq!(services.books.get_book(created.id).await.unwrap().available_count, 1);
    assert!(matches!(services.loans.get_loan(loan.id).await, Err(AppError::NotFound(_))));
    assert!(matches!(services.loans.delete_loan(loan.id).await, Err(AppError::NotFound(_))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn deleting_borrower_restocks_outstanding_loans(pool: PgPool) {
    let services = services(pool);
    let author_id = author(&services, "José Martí").await;
    let borrower = user(&services, "Prestataria", "prestataria@example.com").await;
    let other = user(&services, "Otro lector", "otro@example.com").await;
    let versos = services
        .books
        .create_book(book("Versos sencillos", author_id, "Poesía", 1))
        .await
        .unwrap();
    let ismaelillo = services
        .books
        .create_book(book("Ismaelillo", author_id, "Poesía", 3))
        .await
        .unwrap();

    services
        .loans
        .create_loan(LoanRequest { user_id: borrower, book_id: versos.id })
        .await
        .unwrap();
    services
        .loans
        .create_loan(LoanRequest { user_id: borrower, book_id: ismaelillo.id })
        .await
        .unwrap();
    let returned = services
        .loans
        .create_loan(LoanRequest { user_id: borrower, book_id: ismaelillo.id })
        .await
        .unwrap();
    services.loans.return_loan(returned.id).await.unwrap();
    services
        .loans
        .create_loan(LoanRequest { user_id: other, book_id: ismaelillo.id })
        .await
        .unwrap();
    assert_eq!(services.books.get_book(versos.id).await.unwrap().available_count, 0);
    assert_eq!(services.books.get_book(ismaelillo.id).await.unwrap().available_count, 1);

    services.users.delete_user(borrower).await.unwrap();

    assert!(services.loans.list_user_loans(borrower).await.unwrap().is_empty());
    assert_eq!(services.books.get_book(versos.id).await.unwrap().available_count, 1);
    // The already-returned loan is not counted twice; the other reader's copy stays out
    assert_eq!(services.books.get_book(ismaelillo.id).await.unwrap().available_count, 2);
    assert_eq!(services.loans.list_outstanding_loans().await.unwrap().len(), 1);
}
