use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    CustomerQuery, DependOnCustomerQuery, DependOnMovieQuery, DependOnPaymentQuery,
    DependOnRentalQuery, MovieQuery, PaymentQuery, RentalQuery,
};
use kernel::interface::update::{
    CopyModifier, CustomerModifier, DependOnCopyModifier, DependOnCustomerModifier,
    DependOnPaymentModifier, DependOnRentalModifier, PaymentModifier, RentalModifier,
};
use kernel::prelude::entity::{
    CreatedAt, CustomerId, MovieId, NewCustomer, NewRental, PaymentAmount, RentalId, RentedAt,
    ReturnedAt, Role, Session,
};
use kernel::KernelError;

use crate::service::customer::validate_new_customer;
use crate::service::{authorize, invalid, not_found};
use crate::transfer::{
    CreateRentalDto, OpenRentalDto, PaymentDto, RecordPaymentDto, RentalCustomerDto, RentalDto,
    ReturnRentalDto,
};

enum RentalCustomer {
    Existing(CustomerId),
    New(NewCustomer),
}

#[async_trait::async_trait]
pub trait CreateRentalService:
    'static
    + Sync
    + Send
    + DependOnCustomerQuery
    + DependOnCustomerModifier
    + DependOnMovieQuery
    + DependOnCopyModifier
    + DependOnRentalQuery
    + DependOnRentalModifier
{
    /// Claims one available copy of the movie for the customer.
    ///
    /// The customer insert (if any), the copy claim and the rental insert share one
    /// transaction. Any failure leaves the store unchanged.
    async fn create_rental(
        &self,
        session: Option<&Session>,
        dto: CreateRentalDto,
    ) -> error_stack::Result<RentalDto, KernelError> {
        authorize(session, Role::User)?;
        let customer = match dto.customer {
            RentalCustomerDto::Existing(id) => RentalCustomer::Existing(CustomerId::new(id)),
            RentalCustomerDto::New(customer) => {
                RentalCustomer::New(validate_new_customer(customer)?)
            }
        };
        let movie_id = MovieId::new(dto.movie_id);

        let mut connection = self.database_connection().transact().await?;
        let customer_id = match customer {
            RentalCustomer::New(customer) => {
                self.customer_modifier()
                    .create(&mut connection, &customer)
                    .await?
            }
            RentalCustomer::Existing(id) => {
                if self
                    .customer_query()
                    .find_by_id(&mut connection, &id)
                    .await?
                    .is_none()
                {
                    return Err(not_found(format!(
                        "Customer {} does not exist",
                        i64::from(id)
                    )));
                }
                id
            }
        };
        if self
            .movie_query()
            .find_by_id(&mut connection, &movie_id)
            .await?
            .is_none()
        {
            return Err(not_found(format!("Movie {} does not exist", dto.movie_id)));
        }

        let Some(copy_id) = self
            .copy_modifier()
            .claim_available(&mut connection, &movie_id)
            .await?
        else {
            connection.roll_back().await?;
            return Err(Report::new(KernelError::NoAvailableCopy)
                .attach_printable(format!("No copy of movie {} is available", dto.movie_id)));
        };

        let rental = NewRental::open(customer_id, copy_id, RentedAt::now());
        let rental_id = self
            .rental_modifier()
            .create(&mut connection, &rental)
            .await?;
        let created = self
            .rental_query()
            .find_by_id(&mut connection, &rental_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Internal)
                    .attach_printable(format!("Rental {} was not stored", i64::from(rental_id)))
            })?;
        connection.commit().await?;

        tracing::info!(
            "rental {} opened: copy {} of movie {} for customer {}",
            i64::from(rental_id),
            i64::from(copy_id),
            dto.movie_id,
            i64::from(customer_id)
        );
        Ok(RentalDto::from(created))
    }
}

impl<T> CreateRentalService for T where
    T: DependOnCustomerQuery
        + DependOnCustomerModifier
        + DependOnMovieQuery
        + DependOnCopyModifier
        + DependOnRentalQuery
        + DependOnRentalModifier
{
}

#[async_trait::async_trait]
pub trait ReturnRentalService:
    'static + Sync + Send + DependOnRentalQuery + DependOnRentalModifier + DependOnCopyModifier
{
    /// Closes an open rental and puts its copy back on the shelf.
    ///
    /// Unknown and already returned rentals both fail with [`KernelError::NotFound`].
    async fn return_rental(
        &self,
        session: Option<&Session>,
        dto: ReturnRentalDto,
    ) -> error_stack::Result<RentalDto, KernelError> {
        authorize(session, Role::User)?;
        let rental_id = RentalId::new(dto.rental_id);

        let mut connection = self.database_connection().transact().await?;
        let Some(copy_id) = self
            .rental_modifier()
            .close(&mut connection, &rental_id, &ReturnedAt::now())
            .await?
        else {
            connection.roll_back().await?;
            return Err(not_found(format!(
                "No open rental with id {}",
                dto.rental_id
            )));
        };
        if !self
            .copy_modifier()
            .release(&mut connection, &copy_id)
            .await?
        {
            return Err(Report::new(KernelError::Internal).attach_printable(format!(
                "Copy {} of rental {} was not rented",
                i64::from(copy_id),
                dto.rental_id
            )));
        }
        let returned = self
            .rental_query()
            .find_by_id(&mut connection, &rental_id)
            .await?
            .ok_or_else(|| not_found(format!("No rental with id {}", dto.rental_id)))?;
        connection.commit().await?;

        tracing::info!(
            "rental {} returned, copy {} available again",
            dto.rental_id,
            i64::from(copy_id)
        );
        Ok(RentalDto::from(returned))
    }
}

impl<T> ReturnRentalService for T where
    T: DependOnRentalQuery + DependOnRentalModifier + DependOnCopyModifier
{
}

#[async_trait::async_trait]
pub trait GetRentalService: 'static + Sync + Send + DependOnRentalQuery {
    /// Newest rental first.
    async fn list_open_rentals(
        &self,
        session: Option<&Session>,
    ) -> error_stack::Result<Vec<OpenRentalDto>, KernelError> {
        authorize(session, Role::User)?;
        let mut connection = self.database_connection().transact().await?;
        let rentals = self.rental_query().find_open(&mut connection).await?;
        Ok(rentals.into_iter().map(OpenRentalDto::from).collect())
    }
}

impl<T> GetRentalService for T where T: DependOnRentalQuery {}

#[async_trait::async_trait]
pub trait PaymentService:
    'static + Sync + Send + DependOnRentalQuery + DependOnPaymentQuery + DependOnPaymentModifier
{
    async fn record_payment(
        &self,
        session: Option<&Session>,
        dto: RecordPaymentDto,
    ) -> error_stack::Result<PaymentDto, KernelError> {
        authorize(session, Role::User)?;
        if !(dto.amount.is_finite() && dto.amount > 0.0) {
            return Err(invalid("Payment amount must be greater than zero"));
        }
        let rental_id = RentalId::new(dto.rental_id);
        let amount = PaymentAmount::new(dto.amount);
        let paid_at = CreatedAt::now();

        let mut connection = self.database_connection().transact().await?;
        if self
            .rental_query()
            .find_by_id(&mut connection, &rental_id)
            .await?
            .is_none()
        {
            return Err(not_found(format!("No rental with id {}", dto.rental_id)));
        }
        let id = self
            .payment_modifier()
            .create(&mut connection, &rental_id, &amount, &paid_at)
            .await?;
        connection.commit().await?;

        tracing::info!(
            "payment {} of {:.2} for rental {}",
            i64::from(id),
            dto.amount,
            dto.rental_id
        );
        Ok(PaymentDto {
            id: id.into(),
            rental_id: dto.rental_id,
            amount: dto.amount,
            paid_at: *paid_at.as_ref(),
        })
    }

    async fn list_payments(
        &self,
        session: Option<&Session>,
        rental_id: i64,
    ) -> error_stack::Result<Vec<PaymentDto>, KernelError> {
        authorize(session, Role::User)?;
        let id = RentalId::new(rental_id);
        let mut connection = self.database_connection().transact().await?;
        if self
            .rental_query()
            .find_by_id(&mut connection, &id)
            .await?
            .is_none()
        {
            return Err(not_found(format!("No rental with id {rental_id}")));
        }
        let payments = self
            .payment_query()
            .find_by_rental_id(&mut connection, &id)
            .await?;
        Ok(payments.into_iter().map(PaymentDto::from).collect())
    }
}

impl<T> PaymentService for T where
    T: DependOnRentalQuery + DependOnPaymentQuery + DependOnPaymentModifier
{
}

#[cfg(test)]
mod test {
    use driver::database::SqliteDatabase;
    use kernel::prelude::entity::{Role, Session};
    use kernel::KernelError;

    use super::{CreateRentalService, GetRentalService, PaymentService, ReturnRentalService};
    use crate::service::test_support::session;
    use crate::service::{CreateCustomerService, CreateMovieService, GetCustomerService, GetMovieService};
    use crate::transfer::{
        CreateCustomerDto, CreateMovieDto, CreateRentalDto, RecordPaymentDto, RentalCustomerDto,
        ReturnRentalDto,
    };

    fn walk_in(email: &str) -> CreateCustomerDto {
        CreateCustomerDto {
            first_name: "Marge".to_string(),
            last_name: "Gunderson".to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    /// Movie with `copies` copies plus one registered customer.
    async fn shelf(
        db: &SqliteDatabase,
        title: &str,
        copies: i64,
    ) -> error_stack::Result<(Session, i64, i64), KernelError> {
        let admin = session(db, "boss", Role::Admin).await?;
        let clerk = session(db, "clerk", Role::User).await?;
        let movie_id = db
            .create_movie(
                Some(&admin),
                CreateMovieDto {
                    title: title.to_string(),
                    copies,
                    ..Default::default()
                },
            )
            .await?;
        let customer = db
            .create_customer(Some(&clerk), walk_in("marge@brainerd.example"))
            .await?;
        Ok((clerk, movie_id, customer.id))
    }

    fn rent(customer_id: i64, movie_id: i64) -> CreateRentalDto {
        CreateRentalDto {
            customer: RentalCustomerDto::Existing(customer_id),
            movie_id,
        }
    }

    #[tokio::test]
    async fn last_copy_goes_then_rentals_are_refused() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let (clerk, fargo, customer) = shelf(&db, "Fargo", 3).await?;
        db.create_rental(Some(&clerk), rent(customer, fargo)).await?;
        assert_eq!(db.get_movie(fargo).await?.available_copies, 2);

        let second = db.create_rental(Some(&clerk), rent(customer, fargo)).await?;
        assert_eq!(second.status, "OPEN");
        assert_eq!(second.due_at - second.rented_at, time::Duration::days(5));
        assert_eq!(db.get_movie(fargo).await?.available_copies, 1);

        let third = db.create_rental(Some(&clerk), rent(customer, fargo)).await?;
        assert_ne!(second.copy_id, third.copy_id);
        assert_eq!(db.get_movie(fargo).await?.available_copies, 0);

        let refused = db.create_rental(Some(&clerk), rent(customer, fargo)).await;
        assert_eq!(
            refused.expect_err("every copy is out").current_context(),
            &KernelError::NoAvailableCopy
        );
        assert_eq!(db.list_open_rentals(Some(&clerk)).await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn refused_rental_registers_nobody() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let (clerk, heat, customer) = shelf(&db, "Heat", 1).await?;
        db.create_rental(Some(&clerk), rent(customer, heat)).await?;

        let refused = db
            .create_rental(
                Some(&clerk),
                CreateRentalDto {
                    customer: RentalCustomerDto::New(walk_in("norm@brainerd.example")),
                    movie_id: heat,
                },
            )
            .await;
        assert_eq!(
            refused.expect_err("no copy left").current_context(),
            &KernelError::NoAvailableCopy
        );
        assert_eq!(db.list_customers(Some(&clerk)).await?.len(), 1);
        assert_eq!(db.list_open_rentals(Some(&clerk)).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn walk_in_customer_is_registered_with_the_rental() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let (clerk, heat, _) = shelf(&db, "Heat", 1).await?;

        let rental = db
            .create_rental(
                Some(&clerk),
                CreateRentalDto {
                    customer: RentalCustomerDto::New(walk_in("norm@brainerd.example")),
                    movie_id: heat,
                },
            )
            .await?;
        let customer = db.get_customer(Some(&clerk), rental.customer_id).await?;
        assert_eq!(customer.email, "norm@brainerd.example");

        let blank = db
            .create_rental(
                Some(&clerk),
                CreateRentalDto {
                    customer: RentalCustomerDto::New(walk_in(" ")),
                    movie_id: heat,
                },
            )
            .await;
        assert_eq!(
            blank.expect_err("email is blank").current_context(),
            &KernelError::Validation
        );
        Ok(())
    }

    #[tokio::test]
    async fn unknown_customer_or_movie_is_not_found() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let (clerk, heat, customer) = shelf(&db, "Heat", 1).await?;

        let nobody = db.create_rental(Some(&clerk), rent(customer + 1, heat)).await;
        assert_eq!(
            nobody.expect_err("customer does not exist").current_context(),
            &KernelError::NotFound
        );
        let nothing = db.create_rental(Some(&clerk), rent(customer, heat + 1)).await;
        assert_eq!(
            nothing.expect_err("movie does not exist").current_context(),
            &KernelError::NotFound
        );
        let anonymous = db.create_rental(None, rent(customer, heat)).await;
        assert_eq!(
            anonymous.expect_err("no session").current_context(),
            &KernelError::Authentication
        );
        assert_eq!(db.get_movie(heat).await?.available_copies, 1);
        Ok(())
    }

    #[tokio::test]
    async fn return_frees_the_copy_once() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let (clerk, heat, customer) = shelf(&db, "Heat", 1).await?;
        let rental = db.create_rental(Some(&clerk), rent(customer, heat)).await?;

        let returned = db
            .return_rental(Some(&clerk), ReturnRentalDto { rental_id: rental.id })
            .await?;
        assert_eq!(returned.status, "RETURNED");
        assert!(returned.returned_at.is_some());
        assert_eq!(db.get_movie(heat).await?.available_copies, 1);
        assert!(db.list_open_rentals(Some(&clerk)).await?.is_empty());

        let again = db
            .return_rental(Some(&clerk), ReturnRentalDto { rental_id: rental.id })
            .await;
        assert_eq!(
            again.expect_err("already returned").current_context(),
            &KernelError::NotFound
        );
        assert_eq!(db.get_movie(heat).await?.available_copies, 1);

        let rerented = db.create_rental(Some(&clerk), rent(customer, heat)).await?;
        assert_eq!(rerented.copy_id, rental.copy_id);
        Ok(())
    }

    #[tokio::test]
    async fn racing_clerks_split_the_last_copy() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let (clerk, heat, customer) = shelf(&db, "Heat", 1).await?;

        let (first, second) = tokio::join!(
            db.create_rental(Some(&clerk), rent(customer, heat)),
            db.create_rental(Some(&clerk), rent(customer, heat)),
        );
        let outcomes = [first, second];
        assert_eq!(outcomes.iter().filter(|outcome| outcome.is_ok()).count(), 1);
        let loser = outcomes
            .into_iter()
            .find_map(Result::err)
            .expect("one clerk loses");
        assert_eq!(loser.current_context(), &KernelError::NoAvailableCopy);
        assert_eq!(db.get_movie(heat).await?.available_copies, 0);
        Ok(())
    }

    #[tokio::test]
    async fn payments_are_kept_per_rental() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let (clerk, heat, customer) = shelf(&db, "Heat", 1).await?;
        let rental = db.create_rental(Some(&clerk), rent(customer, heat)).await?;

        let payment = db
            .record_payment(
                Some(&clerk),
                RecordPaymentDto {
                    rental_id: rental.id,
                    amount: 2.99,
                },
            )
            .await?;
        assert_eq!(payment.rental_id, rental.id);
        let payments = db.list_payments(Some(&clerk), rental.id).await?;
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].amount, 2.99);

        let free = db
            .record_payment(
                Some(&clerk),
                RecordPaymentDto {
                    rental_id: rental.id,
                    amount: 0.0,
                },
            )
            .await;
        assert_eq!(
            free.expect_err("amount must be positive").current_context(),
            &KernelError::Validation
        );
        let unknown = db.list_payments(Some(&clerk), rental.id + 1).await;
        assert_eq!(
            unknown.expect_err("rental does not exist").current_context(),
            &KernelError::NotFound
        );
        Ok(())
    }
}
